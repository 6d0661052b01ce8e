pub mod health;
pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

// Re-export routers for easier importing
pub use health::router as health_router;
pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use std::sync::Arc;

use diesel::SqliteConnection;
use tokio::sync::Mutex;
use utoipa::OpenApi;

/// Each request runs its store round-trips to completion on this one
/// connection; the store's transactions are the only consistency mechanism.
pub type Db = Arc<Mutex<SqliteConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
        health::health,
    ),
    components(
        schemas(
            crate::serializer::RestaurantSummary,
            crate::serializer::RestaurantDetail,
            crate::serializer::RestaurantPizzaEntry,
            crate::serializer::PizzaSummary,
            crate::serializer::CreateRestaurantPizzaRequest,
            crate::serializer::RestaurantPizzaCreated,
            crate::serializer::HealthResponse,
            crate::serializer::ApiErrorResponse,
            crate::serializer::DatabaseErrorResponse,
            crate::serializer::ValidationErrorResponse
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant endpoints"),
        (name = "pizzas", description = "Pizza endpoints"),
        (name = "restaurant_pizzas", description = "Menu entry endpoints"),
        (name = "health", description = "Health check")
    ),
    info(
        title = "Pizzeria API",
        description = "Restaurants, pizzas, and the menu entries between them",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
