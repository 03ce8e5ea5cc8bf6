pub mod error;
pub mod gemini;
pub mod provider;
pub mod response;
pub mod retry;
