use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use models::{pizza, restaurant, restaurant_pizza};

use crate::errors::ApiError;
use crate::routes::AppState;

/// Body of POST /restaurant_pizzas. Fields are optional so that presence
/// is checked here, ahead of the range check, with the same error shape
/// for both.
#[derive(Debug, Deserialize)]
pub struct CreateRestaurantPizza {
    pub price: Option<i32>,
    pub pizza_id: Option<i32>,
    pub restaurant_id: Option<i32>,
}

/// POST /restaurant_pizzas
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    Json(input): Json<CreateRestaurantPizza>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (Some(price), Some(pizza_id), Some(restaurant_id)) =
        (input.price, input.pizza_id, input.restaurant_id)
    else {
        return Err(ApiError::validation_errors());
    };
    restaurant_pizza::validate_price(price)?;

    let pizza = pizza::find_by_id(&state.db, pizza_id).await?;
    let restaurant = restaurant::find_by_id(&state.db, restaurant_id).await?;
    let (Some(pizza), Some(restaurant)) = (pizza, restaurant) else {
        return Err(ApiError::MissingReference("Pizza or Restaurant not found".into()));
    };

    // ModelError::Db surfaces as 500 after the factory rolled back
    let created = restaurant_pizza::create(&state.db, price, restaurant.id, pizza.id).await?;

    let body = restaurant_pizza::expanded(&created, &restaurant, &pizza);
    Ok((StatusCode::CREATED, Json(Value::Object(body))))
}
