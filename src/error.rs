use crate::ai::error::GenerationError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No ingredients found for {meal_slot}")]
    NoIngredients { meal_slot: String },

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
