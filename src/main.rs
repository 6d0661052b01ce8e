use std::sync::Arc;

use axum::Router;
use clap::{Parser, Subcommand};
use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pizzeria_api::handlers::{
    health_router, pizza_router, restaurant_pizza_router, restaurant_router, ApiDoc, AppState,
};
use pizzeria_api::models::{NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant};
use pizzeria_api::schema::{pizzas, restaurant_pizzas, restaurants};
use pizzeria_api::{establish_connection, MIGRATIONS};

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve,
    /// Reset the database and load sample data
    Seed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Serve => serve().await,
        Commands::Seed => seed(),
    }
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = establish_connection();
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    let state = AppState {
        db: Arc::new(Mutex::new(conn)),
    };

    let app = Router::new()
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .merge(health_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8100").await?;
    info!("Pizzeria API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

fn seed() -> Result<(), Box<dyn std::error::Error>> {
    let conn = &mut establish_connection();
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(restaurant_pizzas::table).execute(conn)?;
        diesel::delete(pizzas::table).execute(conn)?;
        diesel::delete(restaurants::table).execute(conn)?;

        let shack: Restaurant = diesel::insert_into(restaurants::table)
            .values(&NewRestaurant {
                name: "Karen's Pizza Shack".to_string(),
                address: "address1".to_string(),
            })
            .returning(Restaurant::as_returning())
            .get_result(conn)?;
        let sanjay: Restaurant = diesel::insert_into(restaurants::table)
            .values(&NewRestaurant {
                name: "Sanjay's Pizza".to_string(),
                address: "address2".to_string(),
            })
            .returning(Restaurant::as_returning())
            .get_result(conn)?;
        let kiki: Restaurant = diesel::insert_into(restaurants::table)
            .values(&NewRestaurant {
                name: "Kiki's Pizza".to_string(),
                address: "address3".to_string(),
            })
            .returning(Restaurant::as_returning())
            .get_result(conn)?;

        let emma: Pizza = diesel::insert_into(pizzas::table)
            .values(&NewPizza {
                name: "Emma".to_string(),
                ingredients: "Dough, Tomato Sauce, Cheese".to_string(),
            })
            .returning(Pizza::as_returning())
            .get_result(conn)?;
        let geri: Pizza = diesel::insert_into(pizzas::table)
            .values(&NewPizza {
                name: "Geri".to_string(),
                ingredients: "Dough, Tomato Sauce, Cheese, Pepperoni".to_string(),
            })
            .returning(Pizza::as_returning())
            .get_result(conn)?;
        let melanie: Pizza = diesel::insert_into(pizzas::table)
            .values(&NewPizza {
                name: "Melanie".to_string(),
                ingredients: "Dough, Sauce, Ricotta, Red peppers, Mustard".to_string(),
            })
            .returning(Pizza::as_returning())
            .get_result(conn)?;

        let entries = [
            NewRestaurantPizza::new(1, shack.id, emma.id).expect("seed price in range"),
            NewRestaurantPizza::new(4, sanjay.id, geri.id).expect("seed price in range"),
            NewRestaurantPizza::new(5, kiki.id, melanie.id).expect("seed price in range"),
        ];
        for entry in &entries {
            diesel::insert_into(restaurant_pizzas::table)
                .values(entry)
                .execute(conn)?;
        }

        Ok(())
    })?;

    info!("Seeded 3 restaurants, 3 pizzas, 3 menu entries");

    Ok(())
}
