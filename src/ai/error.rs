use std::time::Duration;

/// Failure of a call to the text-generation service.
///
/// Every variant except `Exhausted` describes a single attempt and is retried
/// by [`complete_with_retry`](crate::ai::retry::complete_with_retry).
/// `Exhausted` is the only variant that leaves the retry loop.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Gemini request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("HTTP request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Gemini API error ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("{0}")]
    Parse(String),

    #[error("Gemini generation failed after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<GenerationError>,
    },
}

impl GenerationError {
    pub fn no_text() -> Self {
        Self::Parse("No text returned from Gemini".to_string())
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Exhausted { last, .. } => last.is_timeout(),
            _ => false,
        }
    }

    /// Short label used as a structured log field.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Network(_) => "network",
            Self::Http { .. } => "http",
            Self::Parse(_) => "parse",
            Self::Exhausted { .. } => "exhausted",
        }
    }
}
