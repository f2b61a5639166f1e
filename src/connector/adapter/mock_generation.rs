use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::GenerationService;
use crate::domain::DomainError;

/// In-memory [`GenerationService`] for tests and `--mock` runs.
///
/// Responses are scripted: each `generate` call pops the next queued entry.
/// An exhausted queue yields empty strings, which drives every pipeline down
/// its fallback path. That makes the mock useful for exercising the tool
/// without a running server.
pub struct MockGeneration {
    model: String,
    responses: Mutex<VecDeque<Result<String, String>>>,
    models: Mutex<Option<Vec<String>>>,
}

impl MockGeneration {
    pub fn new() -> Self {
        Self::with_model("mock-model")
    }

    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            responses: Mutex::new(VecDeque::new()),
            models: Mutex::new(None),
        }
    }

    /// Queue a successful response.
    pub fn push_response(&self, response: impl Into<String>) {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(Ok(response.into()));
    }

    /// Queue a transport-level failure.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(Err(message.into()));
    }

    /// Override the model list reported by `list_models`. Without an
    /// override the mock reports its own model as available.
    pub fn push_models(&self, models: Vec<String>) {
        *self.models.lock().expect("mock lock poisoned") = Some(models);
    }
}

impl Default for MockGeneration {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationService for MockGeneration {
    async fn generate(&self, _prompt: &str, _stream: bool) -> Result<String, DomainError> {
        let next = self
            .responses
            .lock()
            .expect("mock lock poisoned")
            .pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(DomainError::generation(message)),
            None => Ok(String::new()),
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, DomainError> {
        let overridden = self.models.lock().expect("mock lock poisoned").clone();
        Ok(overridden.unwrap_or_else(|| vec![self.model.clone()]))
    }

    fn model(&self) -> &str {
        &self.model
    }
}
