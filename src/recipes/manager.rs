use std::sync::Arc;

use serde::Serialize;

use crate::ai::gemini::GeminiProvider;
use crate::ai::provider::{AiProvider, CompletionRequest};
use crate::ai::retry::{complete_with_retry, RetryPolicy};
use crate::config::GenerationConfig;
use crate::error::AppError;
use crate::recipes::fallback::{local_meal_plan, local_recipes};
use crate::recipes::ingredients::collect_ingredients;
use crate::recipes::meal_plan::JsonContract;
use crate::recipes::plan::{DayPlan, MealType};
use crate::recipes::prompts::{build_meal_plan_prompt, build_recipe_prompt};
use crate::recipes::sanitize::to_safe_html;

/// Generated recipes: the raw model (or fallback) markdown and its sanitized HTML.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeResult {
    pub text: String,
    pub html: String,
}

/// Entry point for recipe generation.
///
/// Holds no per-request state, so one instance is shared by all handlers.
/// Without a provider every call takes the deterministic local path.
#[derive(Clone)]
pub struct RecipeManager {
    provider: Option<Arc<dyn AiProvider>>,
    retry: RetryPolicy,
}

impl RecipeManager {
    pub fn new(config: &GenerationConfig) -> Self {
        let provider = GeminiProvider::from_config(config)
            .map(|provider| Arc::new(provider) as Arc<dyn AiProvider>);
        Self {
            provider,
            retry: config.retry_policy(),
        }
    }

    pub fn with_provider(provider: Arc<dyn AiProvider>, retry: RetryPolicy) -> Self {
        Self {
            provider: Some(provider),
            retry,
        }
    }

    pub fn local_only() -> Self {
        Self {
            provider: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn uses_remote(&self) -> bool {
        self.provider.is_some()
    }

    /// Generate recipes for the ingredients in `meal_type`'s slot of `plan`.
    pub async fn generate_recipes(
        &self,
        meal_type: MealType,
        plan: &DayPlan,
        day_name: &str,
    ) -> Result<RecipeResult, AppError> {
        let ingredients = collect_ingredients(meal_type, plan);
        if ingredients.is_empty() {
            return Err(AppError::NoIngredients {
                meal_slot: meal_type.slot_name().to_string(),
            });
        }

        let prompt = build_recipe_prompt(meal_type, &ingredients, day_name);

        let text = match &self.provider {
            None => {
                tracing::info!(
                    meal_type = meal_type.as_str(),
                    ingredients = ingredients.len(),
                    "No Gemini credential configured, using local fallback"
                );
                local_recipes(meal_type, &ingredients)
            }
            Some(provider) => {
                tracing::info!(
                    meal_type = meal_type.as_str(),
                    ingredients = ingredients.len(),
                    "Requesting recipes from Gemini"
                );
                let request = CompletionRequest::markdown(prompt);
                complete_with_retry(provider.as_ref(), &request, self.retry)
                    .await?
                    .text
            }
        };

        let html = to_safe_html(&text);
        Ok(RecipeResult { text, html })
    }

    /// Generate a strict-JSON two-recipe meal plan for a free-text request.
    pub async fn generate_meal_plan(&self, input: &str) -> Result<String, AppError> {
        if input.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Input is required for the meal planner.".to_string(),
            ));
        }

        let Some(provider) = &self.provider else {
            tracing::info!("No Gemini credential configured, using local meal plan");
            return Ok(local_meal_plan(input));
        };

        let request = CompletionRequest::json(build_meal_plan_prompt(input));
        let contract = JsonContract::new(provider.as_ref());
        let completion = complete_with_retry(&contract, &request, self.retry).await?;
        Ok(completion.text)
    }
}
