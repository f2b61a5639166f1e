use async_trait::async_trait;

use crate::domain::DomainError;

/// An interface for sending prompts to a text-generation server and
/// receiving the generated text.
///
/// Implementors encapsulate transport and serialization details. Transport
/// failures, non-success statuses, and undecodable payloads surface as
/// `Err(DomainError::GenerationError)`; the use-case layer decides how to
/// degrade (the pipelines here log the error and fall back to templated
/// output rather than failing the run).
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Send `prompt` and return the full generated text. When `stream` is
    /// true the response is consumed incrementally and the accumulated text
    /// is returned once the server signals completion.
    async fn generate(&self, prompt: &str, stream: bool) -> Result<String, DomainError>;

    /// List the model identifiers the server has available. Used for the
    /// connectivity check before any generation is attempted.
    async fn list_models(&self) -> Result<Vec<String>, DomainError>;

    /// The model identifier requests are issued against.
    fn model(&self) -> &str;
}
