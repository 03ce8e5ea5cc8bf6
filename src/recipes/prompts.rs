use crate::recipes::ingredients::Ingredient;
use crate::recipes::plan::MealType;

/// Fields each markdown recipe must contain, in order.
const RECIPE_FIELDS: [&str; 8] = [
    "Recipe Name",
    "Dish Type (starter, main, etc.)",
    "Preparation Time",
    "Difficulty (Easy / Medium / Hard)",
    "Ingredients (use my provided list + basics like salt/olive oil)",
    "Step-by-step Instructions (numbered)",
    "Chef’s Tip",
    "TOTAL CALORIES: give a single total like: \"Total Calories: 430 kcal\"",
];

/// Exact keys each strict-JSON recipe object must use.
pub const MEAL_PLAN_KEYS: [&str; 8] = [
    "Recipe Name",
    "Dish Type",
    "Preparation Time",
    "Difficulty",
    "Ingredients",
    "Step-by-step Instructions",
    "Chef’s Tip",
    "TOTAL CALORIES",
];

fn meal_context(meal_type: MealType) -> &'static str {
    match meal_type {
        MealType::Lunch => "for lunch (light, midday-appropriate meals)",
        MealType::Dinner => "for dinner (hearty, evening meals)",
    }
}

/// Build the markdown recipe prompt for the collected ingredients.
pub fn build_recipe_prompt(meal_type: MealType, ingredients: &[Ingredient], day_name: &str) -> String {
    let ingredient_list = ingredients
        .iter()
        .map(Ingredient::descriptor)
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = String::new();
    prompt.push_str(&format!(
        "You are an expert chef and nutritionist. Create 3-4 original, creative, LOW-FODMAP, \
         gluten-free recipes {} using these ingredients I have available {}:\n\n",
        meal_context(meal_type),
        day_name
    ));
    prompt.push_str(&ingredient_list);
    prompt.push_str("\n\nFor each recipe provide in CLEAR MARKDOWN:\n");
    for (i, field) in RECIPE_FIELDS.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, field));
    }
    prompt.push_str(
        "\nReturn ONLY Markdown content (no surrounding commentary). \
         Keep responses concise and machine-parseable.",
    );
    prompt
}

/// Build the strict-JSON meal planner prompt for a free-text request.
pub fn build_meal_plan_prompt(input: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!(
        "Based on the user's request: \"{}\", generate two detailed, distinct recipe objects.\n\n",
        input.trim()
    ));
    prompt.push_str("The output MUST be a single JSON object.\n");
    prompt.push_str("This object MUST contain one key: 'recipes'.\n");
    prompt.push_str(
        "The value of 'recipes' must be an array of exactly two JSON objects (one recipe for each day).\n\n",
    );
    prompt.push_str("Each recipe JSON object MUST use the following EXACT keys for the response:\n");
    let hints = [
        "",
        " (e.g., Main, Snack, Dessert)",
        " (e.g., 15 minutes)",
        " (e.g., Easy, Medium, Hard)",
        " (List all ingredients and quantities clearly in a single string)",
        " (List instructions clearly, numbered 1. 2. 3. etc., in a single string)",
        "",
        " (Estimate in kcal, e.g., 450 kcal)",
    ];
    for (key, hint) in MEAL_PLAN_KEYS.iter().zip(hints) {
        prompt.push_str(&format!("\"{}\"{}\n", key, hint));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::plan::Grams;

    fn ingredient(name: &str, grams: u32) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            grams: Grams::from(grams),
        }
    }

    #[test]
    fn test_lunch_prompt_context() {
        let prompt = build_recipe_prompt(MealType::Lunch, &[ingredient("Rice", 100)], "Monday");
        assert!(prompt.contains("light, midday-appropriate"));
        assert!(!prompt.contains("hearty, evening"));
        assert!(prompt.contains("available Monday"));
    }

    #[test]
    fn test_dinner_prompt_context() {
        let prompt = build_recipe_prompt(MealType::Dinner, &[ingredient("Rice", 100)], "Today");
        assert!(prompt.contains("hearty, evening"));
    }

    #[test]
    fn test_prompt_contains_constraints_and_schema() {
        let prompt = build_recipe_prompt(
            MealType::Dinner,
            &[ingredient("Rice", 100), ingredient("Chicken", 150)],
            "Today",
        );
        assert!(prompt.starts_with("You are an expert chef and nutritionist."));
        assert!(prompt.contains("LOW-FODMAP"));
        assert!(prompt.contains("gluten-free"));
        assert!(prompt.contains("3-4"));
        assert!(prompt.contains("Rice (100g), Chicken (150g)"));
        assert!(prompt.contains("1. Recipe Name"));
        assert!(prompt.contains("8. TOTAL CALORIES"));
        assert!(prompt.contains("Total Calories: 430 kcal"));
        assert!(prompt.contains("Return ONLY Markdown content"));
    }

    #[test]
    fn test_meal_plan_prompt_lists_exact_keys() {
        let prompt = build_meal_plan_prompt("  Vegan, weight loss  ");
        assert!(prompt.contains("\"Vegan, weight loss\""));
        assert!(prompt.contains("'recipes'"));
        for key in MEAL_PLAN_KEYS {
            assert!(prompt.contains(&format!("\"{}\"", key)), "missing key {}", key);
        }
    }
}
