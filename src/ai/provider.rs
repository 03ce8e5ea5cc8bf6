use async_trait::async_trait;

use crate::ai::error::GenerationError;

/// Token usage reported by the generation service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Expected shape of the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Json,
}

/// One prompt plus the output contract it expects.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub format: OutputFormat,
}

impl CompletionRequest {
    pub fn markdown(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            format: OutputFormat::Markdown,
        }
    }

    pub fn json(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            format: OutputFormat::Json,
        }
    }
}

/// Text returned by a single successful attempt.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Make exactly one attempt at generating text for `request`.
    /// Retrying is the caller's concern.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GenerationError>;
}
