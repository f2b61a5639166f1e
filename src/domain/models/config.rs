use serde::{Deserialize, Serialize};

/// Default target: Ollama running locally on its standard port.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";
/// Default model expected to be pulled into the local server.
pub const DEFAULT_MODEL: &str = "deepseek-r1";
/// Default number of synthetic rows generated per question.
pub const DEFAULT_ROWS_PER_QUESTION: usize = 100;

/// Configuration for the text-generation server connection.
///
/// Values are resolved once (CLI flag, then environment variable, then
/// default) before any component is constructed, so nothing below the CLI
/// layer reads the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub base_url: String,
    pub model: String,
}

impl GenerationConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Resolve configuration from optional overrides and the environment:
    ///
    /// | Source               | Base URL                  | Model        |
    /// |----------------------|---------------------------|--------------|
    /// | explicit argument    | `base_url`                | `model`      |
    /// | environment          | `OLLAMA_BASE_URL`         | `OLLAMA_MODEL` |
    /// | default              | `http://127.0.0.1:11434`  | `deepseek-r1` |
    pub fn resolve(base_url: Option<String>, model: Option<String>) -> Self {
        let base_url = base_url
            .or_else(|| std::env::var("OLLAMA_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = model
            .or_else(|| std::env::var("OLLAMA_MODEL").ok())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self::new(base_url, model)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }
}
