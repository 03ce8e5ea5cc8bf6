use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

use crate::ai::error::GenerationError;
use crate::ai::provider::{AiProvider, Completion, CompletionRequest};

/// Remove a markdown code fence wrapped around the whole response, if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Ok(re) = Regex::new(r"(?s)^```[A-Za-z]*[ \t]*\n(.*?)\n?```$") else {
        return trimmed;
    };
    match re.captures(trimmed).and_then(|cap| cap.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    }
}

/// Check that `text` is a JSON object with a `recipes` array and return the
/// cleaned JSON text.
pub fn validate_meal_plan(text: &str) -> Result<String, GenerationError> {
    let cleaned = strip_code_fence(text);
    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| GenerationError::Parse(format!("Meal plan is not valid JSON: {}", e)))?;

    match value.get("recipes").and_then(Value::as_array) {
        Some(recipes) if !recipes.is_empty() => Ok(cleaned.to_string()),
        _ => Err(GenerationError::Parse(
            "Meal plan JSON has no 'recipes' array".to_string(),
        )),
    }
}

/// Wraps a provider so that a completion violating the strict-JSON contract
/// fails the attempt, which puts it on the normal retry path.
pub struct JsonContract<'a> {
    inner: &'a dyn AiProvider,
}

impl<'a> JsonContract<'a> {
    pub fn new(inner: &'a dyn AiProvider) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<'a> AiProvider for JsonContract<'a> {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GenerationError> {
        let completion = self.inner.complete(request).await?;
        let text = validate_meal_plan(&completion.text)?;
        Ok(Completion {
            text,
            usage: completion.usage,
        })
    }
}
