use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use diesel::prelude::*;
use serde_json::Value;
use tracing::instrument;

use crate::error::ApiError;
use crate::models::{self, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::serializer::{
    self, CreateRestaurantPizzaRequest, RestaurantPizzaCreated, ValidationErrorResponse,
};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

/// Field coercion matching the reference behavior: JSON integers and numeric
/// strings are accepted, everything else is a validation failure.
fn int_field(payload: &Value, key: &str) -> Option<i32> {
    match payload.get(key)? {
        Value::Number(n) => i32::try_from(n.as_i64()?).ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Menu entry created", body = RestaurantPizzaCreated),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state, payload))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaCreated>), ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::Validation)?;

    // First failure wins; every failure shares the one 400 body.
    let price = int_field(&payload, "price").ok_or(ApiError::Validation)?;
    let pizza_id = int_field(&payload, "pizza_id").ok_or(ApiError::Validation)?;
    let restaurant_id = int_field(&payload, "restaurant_id").ok_or(ApiError::Validation)?;

    let price = models::validate_price(price).map_err(|_| ApiError::Validation)?;

    let conn = &mut *state.db.lock().await;

    let pizza = pizzas::table
        .find(pizza_id)
        .select(Pizza::as_select())
        .first(conn)
        .optional()?
        .ok_or(ApiError::Validation)?;
    let restaurant = restaurants::table
        .find(restaurant_id)
        .select(Restaurant::as_select())
        .first(conn)
        .optional()?
        .ok_or(ApiError::Validation)?;

    let entry = NewRestaurantPizza::new(price, restaurant.id, pizza.id)
        .map_err(|_| ApiError::Validation)?;

    // Persistence failures roll back and collapse into the validation body,
    // matching the observed contract of the reference system.
    let created = conn
        .transaction::<RestaurantPizza, diesel::result::Error, _>(|conn| {
            diesel::insert_into(restaurant_pizzas::table)
                .values(&entry)
                .returning(RestaurantPizza::as_returning())
                .get_result(conn)
        })
        .map_err(|_| ApiError::Validation)?;

    Ok((
        StatusCode::CREATED,
        Json(serializer::serialize_restaurant_pizza_created(
            &created,
            &pizza,
            &restaurant,
        )),
    ))
}
