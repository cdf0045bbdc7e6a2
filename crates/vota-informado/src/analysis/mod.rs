//! AI-assisted explanations of the scoring results.
//!
//! Generation sits behind the [`TextGenerator`] seam; the service consumes the
//! scoring output to build prompts but never feeds anything back into scoring.

mod chat;
mod gemini;
mod generator;
pub mod prompts;
mod service;

pub use chat::{ChatMessage, ChatSender, ChatSession, CHAT_GREETING};
pub use gemini::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use generator::{GenerationError, TextGenerator, UnconfiguredGenerator};
pub use service::{
    AnalysisKind, AnalysisReply, AnalysisService, ReplySource, CHAT_FAILED_MESSAGE,
    EXPLANATION_FAILED_MESSAGE, INTENTION_FAILED_MESSAGE, MISSING_CREDENTIAL_MESSAGE,
};
