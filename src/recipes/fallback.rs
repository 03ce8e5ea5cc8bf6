use serde_json::{json, Map, Value};

use crate::recipes::ingredients::Ingredient;
use crate::recipes::plan::MealType;
use crate::recipes::prompts::MEAL_PLAN_KEYS;

/// At most this many ingredients get a placeholder recipe.
pub const MAX_FALLBACK_RECIPES: usize = 6;

/// Deterministic offline stand-in for the generation service.
///
/// Emits one placeholder recipe per ingredient (up to
/// [`MAX_FALLBACK_RECIPES`]) as markdown. Same input, same bytes.
pub fn local_recipes(meal_type: MealType, ingredients: &[Ingredient]) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "# {} suggestions (local fallback)",
        meal_type.as_str().to_uppercase()
    ));

    for (i, ingredient) in ingredients.iter().take(MAX_FALLBACK_RECIPES).enumerate() {
        lines.push(format!("## Recipe {}: {} Delight", i + 1, ingredient.name));
        lines.push("**Dish Type:** Main".to_string());
        lines.push("**Preparation Time:** 20-30 minutes".to_string());
        lines.push("**Difficulty:** Easy".to_string());
        lines.push("**Ingredients:**".to_string());
        lines.push(format!("- {}", ingredient.descriptor()));
        lines.push("- Salt, pepper, olive oil".to_string());
        lines.push("**Instructions:**".to_string());
        lines.push(format!("1. Prepare {}.", ingredient.name));
        lines.push("2. Cook with olive oil, season to taste.".to_string());
        lines.push("**Chef's Tip:** Use fresh herbs.".to_string());
        lines.push("**Total Calories:** ~400 kcal".to_string());
        lines.push(String::new());
    }

    lines.join("\n\n")
}

/// Offline stand-in for the strict-JSON meal planner: two placeholder recipes.
pub fn local_meal_plan(input: &str) -> String {
    let recipes: Vec<Value> = (1..=2)
        .map(|day| {
            let values = [
                json!(format!("Day {} Simple Plate", day)),
                json!("Main"),
                json!("20-30 minutes"),
                json!("Easy"),
                json!("Rice, seasonal vegetables, olive oil, salt, pepper"),
                json!("1. Cook the rice. 2. Saute the vegetables in olive oil. 3. Season and serve."),
                json!(format!("Adjust portions to fit: {}", input.trim())),
                json!("~450 kcal"),
            ];
            let recipe: Map<String, Value> = MEAL_PLAN_KEYS
                .iter()
                .map(|key| key.to_string())
                .zip(values)
                .collect();
            Value::Object(recipe)
        })
        .collect();

    json!({ "recipes": recipes }).to_string()
}
