use std::collections::HashSet;
use std::fmt;

use crate::recipes::plan::{DayPlan, Grams, MealType};

/// An ingredient fed into the prompt, displayed as `"<name> (<grams>g)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub grams: Grams,
}

impl Ingredient {
    /// The `"name (Ng)"` descriptor string.
    pub fn descriptor(&self) -> String {
        self.to_string()
    }

    fn dedup_key(&self) -> String {
        format!("{}|{}", self.name.to_lowercase(), self.grams)
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}g)", self.name, self.grams)
    }
}

/// Collect the distinct ingredients of the slot `meal_type` resolves to.
///
/// Names are trimmed and blank names skipped. Two items collapse when their
/// lowercased names and gram amounts match; the first one seen is kept, with
/// its original casing, and first-seen order is preserved. A missing slot
/// yields an empty list.
pub fn collect_ingredients(meal_type: MealType, plan: &DayPlan) -> Vec<Ingredient> {
    let Some(meal) = plan.meal(meal_type.slot_name()) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut ingredients = Vec::new();

    for item in &meal.items {
        let name = item.name.trim();
        if name.is_empty() {
            continue;
        }
        let ingredient = Ingredient {
            name: name.to_string(),
            grams: item.grams.clone(),
        };
        if seen.insert(ingredient.dedup_key()) {
            ingredients.push(ingredient);
        }
    }

    ingredients
}
