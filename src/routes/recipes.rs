use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::AppError;
use crate::recipes::{DayPlan, MealType, RecipeResult};
use crate::routes::parse_body;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipesRequest {
    #[serde(default = "default_meal_type")]
    pub meal_type: String,
    #[serde(default)]
    pub day_plan: DayPlan,
    #[serde(default = "default_day_name")]
    pub day_name: String,
}

fn default_meal_type() -> String {
    "dinner".to_string()
}

fn default_day_name() -> String {
    "Today".to_string()
}

impl Default for GenerateRecipesRequest {
    fn default() -> Self {
        Self {
            meal_type: default_meal_type(),
            day_plan: DayPlan::default(),
            day_name: default_day_name(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateRecipesResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub result: RecipeResult,
}

/// POST /api/recipes/generate
///
/// Body: `{ mealType?: "lunch" | "dinner", dayPlan?: {...}, dayName?: string }`.
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateRecipesResponse>, AppError> {
    let request: GenerateRecipesRequest = parse_body(&body)?;
    let meal_type = MealType::from_request(&request.meal_type);

    let span = tracing::info_span!(
        "generate_recipes",
        request_id = %Uuid::new_v4(),
        meal_type = meal_type.as_str(),
        day = %request.day_name,
    );

    let result = state
        .recipes
        .generate_recipes(meal_type, &request.day_plan, &request.day_name)
        .instrument(span)
        .await?;

    Ok(Json(GenerateRecipesResponse { ok: true, result }))
}
