use std::sync::Arc;

use tracing::{info, warn};

use crate::application::GenerationService;
use crate::domain::DomainError;

/// Probes the generation server before any work is attempted.
///
/// Returns `Ok(true)` when the configured model appears in the server's
/// model list (substring match, so `deepseek-r1` matches
/// `deepseek-r1:latest`), `Ok(false)` when the server is up but the model is
/// missing, and `Err` when the server is unreachable.
pub struct CheckConnectionUseCase {
    generator: Arc<dyn GenerationService>,
}

impl CheckConnectionUseCase {
    pub fn new(generator: Arc<dyn GenerationService>) -> Self {
        Self { generator }
    }

    pub async fn execute(&self) -> Result<bool, DomainError> {
        let models = self.generator.list_models().await?;
        let wanted = self.generator.model();

        if models.iter().any(|name| name.contains(wanted)) {
            info!("Model '{}' is available", wanted);
            return Ok(true);
        }

        warn!("Model '{}' not found. Available models:", wanted);
        for name in &models {
            warn!("  - {}", name);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::MockGeneration;

    #[tokio::test]
    async fn finds_model_by_substring() {
        let mock = MockGeneration::with_model("deepseek-r1");
        mock.push_models(vec!["deepseek-r1:latest".to_string(), "llama3".to_string()]);
        let use_case = CheckConnectionUseCase::new(Arc::new(mock));
        assert!(use_case.execute().await.unwrap());
    }

    #[tokio::test]
    async fn reports_missing_model() {
        let mock = MockGeneration::with_model("deepseek-r1");
        mock.push_models(vec!["llama3".to_string()]);
        let use_case = CheckConnectionUseCase::new(Arc::new(mock));
        assert!(!use_case.execute().await.unwrap());
    }
}
