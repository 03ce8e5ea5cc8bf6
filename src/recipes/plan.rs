use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Field names accepted for an item's gram amount, in priority order.
pub const GRAM_ALIASES: [&str; 4] = ["grams", "quantity", "qty", "quantityInGrams"];

pub const DEFAULT_GRAMS: u32 = 100;

/// Which meal slot recipes are generated for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MealType {
    Lunch,
    #[default]
    Dinner,
}

impl MealType {
    /// Exactly `"lunch"` selects lunch; anything else is dinner.
    pub fn from_request(raw: &str) -> Self {
        if raw == "lunch" {
            Self::Lunch
        } else {
            Self::Dinner
        }
    }

    /// Key of the slot in a [`DayPlan`].
    pub fn slot_name(self) -> &'static str {
        match self {
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

/// Gram amount as it should be displayed, e.g. `100` or `42.5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grams(String);

impl Grams {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accepts JSON numbers and strings; anything else is not a gram amount.
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                let text = if let Some(i) = n.as_i64() {
                    i.to_string()
                } else if let Some(u) = n.as_u64() {
                    u.to_string()
                } else {
                    n.as_f64()?.to_string()
                };
                Some(Self(text))
            }
            Value::String(s) => Some(Self(s.clone())),
            _ => None,
        }
    }
}

impl Default for Grams {
    fn default() -> Self {
        Self::from(DEFAULT_GRAMS)
    }
}

impl From<u32> for Grams {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Grams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One logged food item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub grams: Grams,
}

impl Item {
    pub fn new(name: impl Into<String>, grams: impl Into<Grams>) -> Self {
        Self {
            name: name.into(),
            grams: grams.into(),
        }
    }

    /// Lenient conversion: non-objects are dropped, a missing or non-string
    /// name becomes empty, and grams come from the first present alias.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let grams = GRAM_ALIASES
            .iter()
            .filter_map(|alias| obj.get(*alias))
            .find_map(Grams::from_json)
            .unwrap_or_default();
        Some(Self { name, grams })
    }
}

/// Ordered items eaten in one meal slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meal {
    pub items: Vec<Item>,
}

impl Meal {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// A meal whose `items` is missing or not an array has no items.
    pub fn from_json(value: &Value) -> Self {
        let items = value
            .get("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Item::from_json).collect())
            .unwrap_or_default();
        Self { items }
    }
}

impl<'de> Deserialize<'de> for Meal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// Meal slot name (e.g. "Lunch") to the meal eaten in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DayPlan(HashMap<String, Meal>);

impl DayPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meal(mut self, slot: impl Into<String>, meal: Meal) -> Self {
        self.0.insert(slot.into(), meal);
        self
    }

    pub fn meal(&self, slot: &str) -> Option<&Meal> {
        self.0.get(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meal_type_is_case_sensitive() {
        assert_eq!(MealType::from_request("lunch"), MealType::Lunch);
        assert_eq!(MealType::from_request("Lunch"), MealType::Dinner);
        assert_eq!(MealType::from_request("dinner"), MealType::Dinner);
        assert_eq!(MealType::from_request("brunch"), MealType::Dinner);
        assert_eq!(MealType::default().slot_name(), "Dinner");
    }

    #[test]
    fn test_grams_alias_priority() {
        let item = Item::from_json(&json!({ "name": "Oats", "qty": 40, "quantity": 60 })).unwrap();
        assert_eq!(item.grams.as_str(), "60");

        let item = Item::from_json(&json!({ "name": "Oats", "quantityInGrams": 30 })).unwrap();
        assert_eq!(item.grams.as_str(), "30");

        let item = Item::from_json(&json!({ "name": "Oats", "grams": null, "qty": 25 })).unwrap();
        assert_eq!(item.grams.as_str(), "25");
    }

    #[test]
    fn test_grams_default_and_formatting() {
        let item = Item::from_json(&json!({ "name": "Tofu" })).unwrap();
        assert_eq!(item.grams.as_str(), "100");

        let item = Item::from_json(&json!({ "name": "Tofu", "grams": 42.5 })).unwrap();
        assert_eq!(item.grams.as_str(), "42.5");

        let item = Item::from_json(&json!({ "name": "Tofu", "grams": 150.0 })).unwrap();
        assert_eq!(item.grams.as_str(), "150");

        let item = Item::from_json(&json!({ "name": "Tofu", "grams": "80" })).unwrap();
        assert_eq!(item.grams.as_str(), "80");
    }

    #[test]
    fn test_non_object_item_is_dropped() {
        assert!(Item::from_json(&json!("Rice")).is_none());
        assert!(Item::from_json(&json!(null)).is_none());
    }

    #[test]
    fn test_day_plan_deserializes_leniently() {
        let plan: DayPlan = serde_json::from_value(json!({
            "Lunch": { "items": [{ "name": "Rice", "grams": 100 }, 7] },
            "Dinner": { "items": "not a list" },
            "Snack": 3
        }))
        .unwrap();

        assert_eq!(plan.meal("Lunch").unwrap().items, vec![Item::new("Rice", 100)]);
        assert!(plan.meal("Dinner").unwrap().items.is_empty());
        assert!(plan.meal("Snack").unwrap().items.is_empty());
        assert!(plan.meal("Breakfast").is_none());
    }
}
