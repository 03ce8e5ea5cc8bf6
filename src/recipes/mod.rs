pub mod fallback;
pub mod ingredients;
pub mod manager;
pub mod meal_plan;
pub mod plan;
pub mod prompts;
pub mod sanitize;

pub use manager::{RecipeManager, RecipeResult};
pub use plan::{DayPlan, MealType};
