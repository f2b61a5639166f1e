use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Name of the column the enhancement pipeline rewrites.
pub const TEXT_COLUMN: &str = "text";

/// An in-memory CSV table: one header row plus string records. Column layout
/// and row order are preserved verbatim through the enhancement pipeline;
/// only `text` cells are rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextTable {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of the `text` column, or `InvalidInput` when the table has no
    /// such header. This is the only schema requirement the enhancement
    /// pipeline imposes.
    pub fn text_column(&self) -> Result<usize, DomainError> {
        self.headers
            .iter()
            .position(|h| h.trim() == TEXT_COLUMN)
            .ok_or_else(|| {
                DomainError::invalid_input(format!(
                    "CSV file must contain a '{}' column",
                    TEXT_COLUMN
                ))
            })
    }

    /// Collect `(record index, text)` for every record whose text cell is
    /// non-empty after trimming. Empty cells pass through untouched.
    pub fn non_empty_texts(&self) -> Result<Vec<(usize, String)>, DomainError> {
        let column = self.text_column()?;
        Ok(self
            .records
            .iter()
            .enumerate()
            .filter_map(|(i, record)| {
                let text = record.get(column).map(|s| s.trim()).unwrap_or_default();
                if text.is_empty() {
                    None
                } else {
                    Some((i, text.to_string()))
                }
            })
            .collect())
    }

    /// Overwrite the text cell of the record at `index`. Out-of-range
    /// indices are ignored; `non_empty_texts` is the only producer of
    /// indices and always yields valid ones.
    pub fn set_text(&mut self, index: usize, value: String) -> Result<(), DomainError> {
        let column = self.text_column()?;
        if let Some(record) = self.records.get_mut(index) {
            if let Some(cell) = record.get_mut(column) {
                *cell = value;
            }
        }
        Ok(())
    }
}
