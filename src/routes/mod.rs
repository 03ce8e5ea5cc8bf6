pub mod health;
pub mod meal_plan;
pub mod recipes;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/recipes/generate", post(recipes::generate))
        .route("/generate-meal", post(meal_plan::generate_meal))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Parse a JSON body, treating an empty body as `T::default()`.
pub(crate) fn parse_body<T>(body: &Bytes) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::InvalidRequest(format!("Invalid request body: {}", e)))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NoIngredients { .. } | AppError::InvalidRequest(_) => {
                tracing::info!(error = %self, "Rejected request");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Generation(err) => {
                tracing::error!(category = err.category(), error = %err, "Recipe generation failed");
                (StatusCode::BAD_GATEWAY, "Recipe generation failed".to_string())
            }
            _ => {
                tracing::error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, Json(json!({ "ok": false, "error": message }))).into_response()
    }
}
