use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::GenerationService;
use crate::domain::services::{json_extract, prompt_builder};
use crate::domain::{QuestionSpec, SyntheticRow};

/// Generates exactly `rows` synthetic `{answer, text}` pairs for one
/// question.
///
/// The model is asked for a strict JSON array; whatever comes back is
/// salvaged with a balanced-bracket scan and permissive object coercion.
/// Shortfalls are padded with templated rows and surpluses truncated, so the
/// result always has exactly the requested length.
pub struct SynthesizeRowsUseCase {
    generator: Arc<dyn GenerationService>,
}

impl SynthesizeRowsUseCase {
    pub fn new(generator: Arc<dyn GenerationService>) -> Self {
        Self { generator }
    }

    pub async fn execute(&self, question: &QuestionSpec, rows: usize) -> Vec<SyntheticRow> {
        if rows == 0 {
            return Vec::new();
        }

        let prompt = prompt_builder::synthetic_generation(question, rows);
        let raw = match self.generator.generate(&prompt, false).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Generation request failed: {}", e);
                String::new()
            }
        };

        let mut parsed = Self::parse_rows(&raw);
        if parsed.is_empty() {
            warn!(
                "No parseable rows for '{}'; using templated fallback",
                question.field_name()
            );
        } else if parsed.len() != rows {
            debug!(
                "Model returned {} rows, requested {}; adjusting",
                parsed.len(),
                rows
            );
        }

        parsed.truncate(rows);
        let mut index = parsed.len();
        while parsed.len() < rows {
            index += 1;
            parsed.push(SyntheticRow::fallback(index, question));
        }
        parsed
    }

    /// Extract and decode the JSON array from a raw response. Non-object
    /// items are discarded; any structural failure yields an empty list.
    fn parse_rows(raw: &str) -> Vec<SyntheticRow> {
        if raw.trim().is_empty() {
            return Vec::new();
        }

        let Some(block) = json_extract::extract_fenced_json_array(raw) else {
            warn!("Response contains no complete JSON array");
            return Vec::new();
        };

        match serde_json::from_str::<Vec<serde_json::Value>>(block) {
            Ok(values) => values
                .iter()
                .filter_map(SyntheticRow::from_json_object)
                .collect(),
            Err(e) => {
                warn!("Extracted array is not valid JSON: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::MockGeneration;

    fn question() -> QuestionSpec {
        QuestionSpec::new("payment_terms", "What are the payment terms?", 1)
    }

    #[tokio::test]
    async fn zero_rows_requested_yields_empty() {
        let use_case = SynthesizeRowsUseCase::new(Arc::new(MockGeneration::new()));
        let rows = use_case.execute(&question(), 0).await;
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn short_array_is_padded_with_fallback_rows() {
        let mock = MockGeneration::new();
        mock.push_response(
            r#"[{"answer": "Net 30", "text": "Payment due in thirty days."},
                {"answer": "Net 60", "text": "Payment due in sixty days."}]"#,
        );
        let use_case = SynthesizeRowsUseCase::new(Arc::new(mock));

        let rows = use_case.execute(&question(), 5).await;
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].answer(), "Net 30");
        assert_eq!(rows[1].answer(), "Net 60");
        assert_eq!(rows[2].answer(), "value_3");
        assert_eq!(rows[3].answer(), "value_4");
        assert_eq!(rows[4].answer(), "value_5");
    }

    #[tokio::test]
    async fn oversized_array_is_truncated() {
        let mock = MockGeneration::new();
        mock.push_response(
            r#"[{"answer": "a", "text": "1"}, {"answer": "b", "text": "2"},
                {"answer": "c", "text": "3"}]"#,
        );
        let use_case = SynthesizeRowsUseCase::new(Arc::new(mock));

        let rows = use_case.execute(&question(), 2).await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].answer(), "b");
    }

    #[tokio::test]
    async fn unparseable_response_yields_all_fallback_rows() {
        let mock = MockGeneration::new();
        mock.push_response("I cannot produce JSON today.");
        let use_case = SynthesizeRowsUseCase::new(Arc::new(mock));

        let rows = use_case.execute(&question(), 3).await;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].answer(), "value_1");
        assert!(rows[2].text().contains("payment_terms"));
    }

    #[tokio::test]
    async fn gateway_failure_yields_all_fallback_rows() {
        let mock = MockGeneration::new();
        mock.push_failure("connection refused");
        let use_case = SynthesizeRowsUseCase::new(Arc::new(mock));

        let rows = use_case.execute(&question(), 2).await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].answer(), "value_1");
        assert_eq!(rows[1].answer(), "value_2");
    }

    #[test]
    fn non_object_items_are_discarded() {
        let rows =
            SynthesizeRowsUseCase::parse_rows(r#"["stray", {"answer": "kept", "text": "t"}, 42]"#);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].answer(), "kept");
    }
}
