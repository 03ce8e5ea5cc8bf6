use crate::config::GenerationConfig;
use crate::recipes::RecipeManager;

/// Shared, read-only state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub recipes: RecipeManager,
}

impl AppState {
    pub fn new(generation: &GenerationConfig) -> Self {
        Self {
            recipes: RecipeManager::new(generation),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&GenerationConfig::default())
    }
}
