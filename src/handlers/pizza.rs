use axum::{extract::State, response::Json, routing::get, Router};
use diesel::prelude::*;
use tracing::instrument;

use crate::error::ApiError;
use crate::models::Pizza;
use crate::schema::pizzas;
use crate::serializer::{self, PizzaSummary};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas without their menu entries", body = [PizzaSummary]),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<PizzaSummary>>, ApiError> {
    let conn = &mut *state.db.lock().await;

    let results = pizzas::table.select(Pizza::as_select()).load(conn)?;

    Ok(Json(
        results
            .iter()
            .map(serializer::serialize_pizza_summary)
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::prelude::*;
    use crate::models::NewPizza;
    use crate::MIGRATIONS;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use diesel_migrations::MigrationHarness;
    use serde_json::Value;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    fn setup_state() -> AppState {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        conn.run_pending_migrations(MIGRATIONS).unwrap();
        AppState {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    async fn insert_pizza(state: &AppState, name: &str, ingredients: &str) -> Pizza {
        let conn = &mut *state.db.lock().await;
        diesel::insert_into(pizzas::table)
            .values(&NewPizza {
                name: name.to_string(),
                ingredients: ingredients.to_string(),
            })
            .returning(Pizza::as_returning())
            .get_result(conn)
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_pizzas() {
        let state = setup_state();
        let p1 = insert_pizza(&state, "Emma", "Dough, Tomato Sauce, Cheese").await;
        let p2 = insert_pizza(&state, "Geri", "Dough, Tomato Sauce, Cheese, Pepperoni").await;

        let response = router()
            .with_state(state)
            .oneshot(Request::builder().uri("/pizzas").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let data: Value = serde_json::from_slice(&body).unwrap();
        let data = data.as_array().unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["id"], p1.id);
        assert_eq!(data[0]["name"], "Emma");
        assert_eq!(data[0]["ingredients"], "Dough, Tomato Sauce, Cheese");
        assert_eq!(data[1]["id"], p2.id);
        for pizza in data {
            assert!(pizza.get("restaurant_pizzas").is_none());
        }
    }

    #[tokio::test]
    async fn test_list_pizzas_empty() {
        let state = setup_state();

        let response = router()
            .with_state(state)
            .oneshot(Request::builder().uri("/pizzas").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let data: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(data, serde_json::json!([]));
    }
}
