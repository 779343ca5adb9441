use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use models::{pizza, restaurant, restaurant_pizza, serialize};

use crate::errors::ApiError;
use crate::routes::AppState;

/// GET /restaurants
pub async fn list_restaurants(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let restaurants = restaurant::find_all(&state.db).await?;
    let mut rows = Vec::with_capacity(restaurants.len());
    for r in &restaurants {
        let row = serialize::project(&serialize::columns(r), &["id", "name", "address"])?;
        rows.push(Value::Object(row));
    }
    Ok(Json(Value::Array(rows)))
}

/// GET /restaurants/{id}
///
/// The restaurant's scalar fields plus its `restaurant_pizzas`, each
/// expanded one level with its own `restaurant` and `pizza` objects.
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let restaurant = restaurant::find_by_id(&state.db, id)
        .await?
        .ok_or_else(ApiError::restaurant_not_found)?;

    let links = restaurant_pizza::find_by_restaurant(&state.db, restaurant.id).await?;
    let mut nested = Vec::with_capacity(links.len());
    for rp in &links {
        let pizza = pizza::find_by_id(&state.db, rp.pizza_id).await?.ok_or_else(|| {
            ApiError::Persistence(format!("pizza {} missing for association {}", rp.pizza_id, rp.id))
        })?;
        nested.push(restaurant_pizza::expanded(rp, &restaurant, &pizza));
    }

    let mut body = serialize::project(&serialize::columns(&restaurant), &["id", "name", "address"])?;
    serialize::include(&mut body, "restaurant_pizzas", nested);
    Ok(Json(Value::Object(body)))
}

/// DELETE /restaurants/{id}
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    restaurant::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
