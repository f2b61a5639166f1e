use serde::{Deserialize, Serialize};

/// One synthesis question read from an input table: which field to generate
/// data for, and the question describing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSpec {
    field_name: String,
    field_question: String,
}

impl QuestionSpec {
    /// Build a spec from raw CSV cell values. A blank `field_name` falls back
    /// to a positional placeholder (`field_3` for the third question).
    pub fn new(field_name: &str, field_question: &str, position: usize) -> Self {
        let name = field_name.trim();
        let field_name = if name.is_empty() {
            format!("field_{}", position)
        } else {
            name.to_string()
        };
        Self {
            field_name,
            field_question: field_question.trim().to_string(),
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn field_question(&self) -> &str {
        &self.field_question
    }

    /// Lowercased file-name-safe form of the field name; anything outside
    /// alphanumerics, `-` and `_` becomes `_`.
    pub fn safe_file_name(&self) -> String {
        self.field_name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_gets_positional_placeholder() {
        let spec = QuestionSpec::new("  ", "What is the policy term?", 3);
        assert_eq!(spec.field_name(), "field_3");
        assert_eq!(spec.field_question(), "What is the policy term?");
    }

    #[test]
    fn safe_file_name_replaces_special_characters() {
        let spec = QuestionSpec::new("Coverage Type (Primary)", "q", 1);
        assert_eq!(spec.safe_file_name(), "coverage_type__primary_");
    }

    #[test]
    fn safe_file_name_keeps_dashes_and_underscores() {
        let spec = QuestionSpec::new("policy-start_date", "q", 1);
        assert_eq!(spec.safe_file_name(), "policy-start_date");
    }
}
