//! Response shaping. Every endpoint projects its records through an explicit
//! allow-list struct here; associations are only embedded where the endpoint
//! contract says so, which keeps nested payloads from recursing.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantSummary {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Street address of the restaurant
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PizzaSummary {
    /// Unique identifier for the pizza
    pub id: i32,
    /// Name of the pizza
    pub name: String,
    /// Comma-separated ingredient list
    pub ingredients: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantPizzaEntry {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    /// Abbreviated pizza; null when the referenced pizza row is missing
    pub pizza: Option<PizzaSummary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantDetail {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaEntry>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantPizzaCreated {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaSummary,
    pub restaurant: RestaurantSummary,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price of the pizza at this restaurant, between 1 and 30
    pub price: i32,
    /// Id of an existing pizza
    pub pizza_id: i32,
    /// Id of an existing restaurant
    pub restaurant_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Serving status of the process
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DatabaseErrorResponse {
    /// Error message
    pub error: String,
    /// Underlying store failure
    pub details: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Always `["validation errors"]`
    pub errors: Vec<String>,
}

pub fn serialize_restaurant_summary(restaurant: &models::Restaurant) -> RestaurantSummary {
    RestaurantSummary {
        id: restaurant.id,
        name: restaurant.name.clone(),
        address: restaurant.address.clone(),
    }
}

pub fn serialize_pizza_summary(pizza: &models::Pizza) -> PizzaSummary {
    PizzaSummary {
        id: pizza.id,
        name: pizza.name.clone(),
        ingredients: pizza.ingredients.clone(),
    }
}

pub fn serialize_restaurant_detail(
    restaurant: &models::Restaurant,
    entries: &[(models::RestaurantPizza, Option<models::Pizza>)],
) -> RestaurantDetail {
    RestaurantDetail {
        id: restaurant.id,
        name: restaurant.name.clone(),
        address: restaurant.address.clone(),
        restaurant_pizzas: entries
            .iter()
            .map(|(entry, pizza)| RestaurantPizzaEntry {
                id: entry.id,
                price: entry.price,
                pizza_id: entry.pizza_id,
                restaurant_id: entry.restaurant_id,
                pizza: pizza.as_ref().map(serialize_pizza_summary),
            })
            .collect(),
    }
}

pub fn serialize_restaurant_pizza_created(
    entry: &models::RestaurantPizza,
    pizza: &models::Pizza,
    restaurant: &models::Restaurant,
) -> RestaurantPizzaCreated {
    RestaurantPizzaCreated {
        id: entry.id,
        price: entry.price,
        pizza_id: entry.pizza_id,
        restaurant_id: entry.restaurant_id,
        pizza: serialize_pizza_summary(pizza),
        restaurant: serialize_restaurant_summary(restaurant),
    }
}
