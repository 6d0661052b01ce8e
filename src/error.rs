use axum::{http::StatusCode, response::Json};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("validation errors")]
    Validation,
    #[error("{message}: {details}")]
    Database {
        message: &'static str,
        details: String,
    },
}

impl From<diesel::result::Error> for ApiError {
    fn from(e: diesel::result::Error) -> Self {
        ApiError::Database {
            message: "Unexpected database error",
            details: e.to_string(),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("{entity} not found") }),
            ),
            // Deliberately non-specific: missing field, non-numeric price,
            // out-of-range price, and dangling foreign keys all share one body.
            ApiError::Validation => (
                StatusCode::BAD_REQUEST,
                json!({ "errors": ["validation errors"] }),
            ),
            ApiError::Database { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message, "details": details }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
