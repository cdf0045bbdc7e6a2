use std::fmt::Debug;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("text generation credential is not configured")]
    MissingCredential,
    #[error("text generation request failed: {0}")]
    Backend(String),
    #[error("text generation API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("text generation runtime unavailable: {0}")]
    Runtime(String),
    #[error("text generation returned no content")]
    EmptyResponse,
}

/// Delegated natural-language generation; implementations may fail but never panic.
pub trait TextGenerator: Debug + Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt)
    }
}

/// Stand-in used when no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredGenerator;

impl TextGenerator for UnconfiguredGenerator {
    fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::MissingCredential)
    }
}
