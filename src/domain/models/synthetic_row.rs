use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::QuestionSpec;

/// One generated `{answer, text}` pair for a synthesis question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticRow {
    answer: String,
    text: String,
}

impl SyntheticRow {
    pub fn new(answer: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            text: text.into(),
        }
    }

    /// Coerce a parsed JSON value into a row. Non-object values are rejected;
    /// missing or non-string `answer`/`text` fields become empty strings,
    /// matching the permissive handling of model output elsewhere.
    pub fn from_json_object(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let field = |key: &str| {
            object
                .get(key)
                .map(|v| match v {
                    Value::String(s) => s.trim().to_string(),
                    other => other.to_string(),
                })
                .unwrap_or_default()
        };
        Some(Self::new(field("answer"), field("text")))
    }

    /// Templated filler row used when generation or parsing comes up short.
    /// `index` is 1-based and continues past any successfully parsed rows.
    pub fn fallback(index: usize, question: &QuestionSpec) -> Self {
        Self::new(
            format!("value_{}", index),
            format!(
                "Synthetic response {} for {}: {}",
                index,
                question.field_name(),
                question.field_question()
            ),
        )
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_string_fields_with_trimming() {
        let value = json!({"answer": "  Net 30  ", "text": " Payment due. "});
        let row = SyntheticRow::from_json_object(&value).expect("object expected");
        assert_eq!(row.answer(), "Net 30");
        assert_eq!(row.text(), "Payment due.");
    }

    #[test]
    fn missing_fields_become_empty_strings() {
        let value = json!({"answer": "yes"});
        let row = SyntheticRow::from_json_object(&value).expect("object expected");
        assert_eq!(row.answer(), "yes");
        assert_eq!(row.text(), "");
    }

    #[test]
    fn non_object_values_are_rejected() {
        assert!(SyntheticRow::from_json_object(&json!("just a string")).is_none());
        assert!(SyntheticRow::from_json_object(&json!([1, 2])).is_none());
    }

    #[test]
    fn fallback_row_embeds_question() {
        let spec = QuestionSpec::new("term", "How long is the term?", 1);
        let row = SyntheticRow::fallback(4, &spec);
        assert_eq!(row.answer(), "value_4");
        assert_eq!(row.text(), "Synthetic response 4 for term: How long is the term?");
    }
}
