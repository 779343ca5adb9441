use axum::extract::State;
use axum::Json;
use serde_json::Value;

use models::{pizza, serialize};

use crate::errors::ApiError;
use crate::routes::AppState;

/// GET /pizzas
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let pizzas = pizza::find_all(&state.db).await?;
    let mut rows = Vec::with_capacity(pizzas.len());
    for p in &pizzas {
        let row = serialize::project(&serialize::columns(p), &["id", "ingredients", "name"])?;
        rows.push(Value::Object(row));
    }
    Ok(Json(Value::Array(rows)))
}
