use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// GET /health - liveness probe, also reports which generation path is active
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let generation = if state.recipes.uses_remote() {
        "remote"
    } else {
        "local_fallback"
    };
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "generation": generation })),
    )
}
