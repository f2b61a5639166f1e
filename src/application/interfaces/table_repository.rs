use std::path::Path;

use async_trait::async_trait;

use crate::domain::{DomainError, QuestionSpec, SyntheticRow, TextTable};

/// The tabular-file boundary: reading input tables and writing results.
///
/// Only structural problems (missing file, missing required columns) are
/// errors here; content-level issues belong to the pipelines.
#[async_trait]
pub trait TableRepository: Send + Sync {
    /// Read a table whose `text` column is to be enhanced in place.
    async fn read_text_table(&self, path: &Path) -> Result<TextTable, DomainError>;

    /// Write a table back, headers first, preserving column layout.
    async fn write_text_table(&self, path: &Path, table: &TextTable) -> Result<(), DomainError>;

    /// Read synthesis questions. Requires `field_name` and `field_question`
    /// columns; blank names become positional placeholders.
    async fn read_questions(&self, path: &Path) -> Result<Vec<QuestionSpec>, DomainError>;

    /// Write one question's synthetic rows with the
    /// `field_name, field_question, answer, text` header.
    async fn write_synthetic_rows(
        &self,
        path: &Path,
        question: &QuestionSpec,
        rows: &[SyntheticRow],
    ) -> Result<(), DomainError>;

    /// True when the file's header row carries the synthesis-question
    /// columns. Used to auto-dispatch between the two pipelines.
    async fn has_question_columns(&self, path: &Path) -> Result<bool, DomainError>;
}
