use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use diesel::prelude::*;
use tracing::instrument;

use crate::error::ApiError;
use crate::models::{Pizza, Restaurant, RestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::serializer::{
    self, ApiErrorResponse, DatabaseErrorResponse, RestaurantDetail, RestaurantSummary,
};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants without their menu entries", body = [RestaurantSummary]),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantSummary>>, ApiError> {
    let conn = &mut *state.db.lock().await;

    let results = restaurants::table
        .select(Restaurant::as_select())
        .load(conn)?;

    Ok(Json(
        results
            .iter()
            .map(serializer::serialize_restaurant_summary)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant with its menu entries", body = RestaurantDetail),
        (status = 404, description = "No restaurant with this id", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant id")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RestaurantDetail>, ApiError> {
    let conn = &mut *state.db.lock().await;

    let restaurant = restaurants::table
        .find(id)
        .select(Restaurant::as_select())
        .first(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Restaurant"))?;

    // Left join so a menu entry whose pizza row is gone still serializes,
    // with `pizza` null.
    let entries = restaurant_pizzas::table
        .left_join(pizzas::table)
        .filter(restaurant_pizzas::restaurant_id.eq(restaurant.id))
        .select((RestaurantPizza::as_select(), Option::<Pizza>::as_select()))
        .load::<(RestaurantPizza, Option<Pizza>)>(conn)?;

    Ok(Json(serializer::serialize_restaurant_detail(
        &restaurant,
        &entries,
    )))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its menu entries deleted"),
        (status = 404, description = "No restaurant with this id", body = ApiErrorResponse),
        (status = 500, description = "Store failure during delete", body = DatabaseErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant id")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let conn = &mut *state.db.lock().await;

    let restaurant = restaurants::table
        .find(id)
        .select(Restaurant::as_select())
        .first(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Restaurant"))?;

    // Dependent menu entries go in the same transaction as the parent row.
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(RestaurantPizza::belonging_to(&restaurant)).execute(conn)?;
        diesel::delete(restaurants::table.find(restaurant.id)).execute(conn)?;
        Ok(())
    })
    .map_err(|e| ApiError::Database {
        message: "Failed to delete restaurant",
        details: e.to_string(),
    })?;

    Ok(StatusCode::NO_CONTENT)
}
