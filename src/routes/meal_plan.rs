use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::AppError;
use crate::routes::parse_body;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateMealRequest {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMealResponse {
    pub ok: bool,
    /// Strict-JSON plan, returned as a string for the client to parse.
    pub meal_plan: String,
}

/// POST /generate-meal
pub async fn generate_meal(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateMealResponse>, AppError> {
    let request: GenerateMealRequest = parse_body(&body)?;

    let span = tracing::info_span!("generate_meal_plan", request_id = %Uuid::new_v4());
    let meal_plan = state
        .recipes
        .generate_meal_plan(&request.input)
        .instrument(span)
        .await?;

    Ok(Json(GenerateMealResponse { ok: true, meal_plan }))
}
