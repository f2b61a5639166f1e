use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::application::TableRepository;
use crate::domain::{DomainError, QuestionSpec, SyntheticRow, TextTable};

const FIELD_NAME_COLUMN: &str = "field_name";
const FIELD_QUESTION_COLUMN: &str = "field_question";

/// CSV-file implementation of [`TableRepository`].
///
/// Readers and writers are flexible about record width: rows shorter than
/// the header are tolerated on the way in and written back unchanged.
pub struct CsvTableStore;

impl CsvTableStore {
    pub fn new() -> Self {
        Self
    }

    fn ensure_exists(path: &Path) -> Result<(), DomainError> {
        if path.is_file() {
            Ok(())
        } else {
            Err(DomainError::not_found(format!(
                "Input CSV file not found: {}",
                path.display()
            )))
        }
    }

    fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>, DomainError> {
        Self::ensure_exists(path)?;
        Ok(csv::ReaderBuilder::new().flexible(true).from_path(path)?)
    }
}

impl Default for CsvTableStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableRepository for CsvTableStore {
    async fn read_text_table(&self, path: &Path) -> Result<TextTable, DomainError> {
        let mut reader = Self::open_reader(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            records.push(record.iter().map(str::to_string).collect());
        }

        debug!("Read {} records from {}", records.len(), path.display());
        Ok(TextTable::new(headers, records))
    }

    async fn write_text_table(&self, path: &Path, table: &TextTable) -> Result<(), DomainError> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
        writer.write_record(table.headers())?;
        for record in table.records() {
            writer.write_record(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    async fn read_questions(&self, path: &Path) -> Result<Vec<QuestionSpec>, DomainError> {
        let mut reader = Self::open_reader(path)?;
        let headers = reader.headers()?.clone();

        let name_column = headers
            .iter()
            .position(|h| h.trim() == FIELD_NAME_COLUMN);
        let question_column = headers
            .iter()
            .position(|h| h.trim() == FIELD_QUESTION_COLUMN);
        let (Some(name_column), Some(question_column)) = (name_column, question_column) else {
            return Err(DomainError::invalid_input(format!(
                "CSV must contain '{}' and '{}' columns",
                FIELD_NAME_COLUMN, FIELD_QUESTION_COLUMN
            )));
        };

        let mut questions = Vec::new();
        for (position, record) in reader.records().enumerate() {
            let record = record?;
            questions.push(QuestionSpec::new(
                record.get(name_column).unwrap_or_default(),
                record.get(question_column).unwrap_or_default(),
                position + 1,
            ));
        }
        Ok(questions)
    }

    async fn write_synthetic_rows(
        &self,
        path: &Path,
        question: &QuestionSpec,
        rows: &[SyntheticRow],
    ) -> Result<(), DomainError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            FIELD_NAME_COLUMN,
            FIELD_QUESTION_COLUMN,
            "answer",
            "text",
        ])?;
        for row in rows {
            writer.write_record([
                question.field_name(),
                question.field_question(),
                row.answer(),
                row.text(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    async fn has_question_columns(&self, path: &Path) -> Result<bool, DomainError> {
        let mut reader = Self::open_reader(path)?;
        let headers = reader.headers()?;
        let has = |wanted: &str| headers.iter().any(|h| h.trim() == wanted);
        Ok(has(FIELD_NAME_COLUMN) && has(FIELD_QUESTION_COLUMN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    #[tokio::test]
    async fn round_trips_a_text_table() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = write_fixture(&dir, "in.csv", "id,text\n1,hello\n2,world\n");
        let output = dir.path().join("out.csv");

        let store = CsvTableStore::new();
        let table = store.read_text_table(&input).await.expect("read failed");
        assert_eq!(table.headers(), ["id", "text"]);
        assert_eq!(table.len(), 2);

        store
            .write_text_table(&output, &table)
            .await
            .expect("write failed");
        let written = std::fs::read_to_string(&output).expect("Failed to read output");
        assert_eq!(written, "id,text\n1,hello\n2,world\n");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let store = CsvTableStore::new();
        let err = store
            .read_text_table(Path::new("/nonexistent/input.csv"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn reads_questions_with_placeholder_names() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = write_fixture(
            &dir,
            "questions.csv",
            "field_name,field_question\nterm,How long?\n,What else?\n",
        );

        let store = CsvTableStore::new();
        let questions = store.read_questions(&input).await.expect("read failed");
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].field_name(), "term");
        assert_eq!(questions[1].field_name(), "field_2");
    }

    #[tokio::test]
    async fn missing_question_columns_is_invalid_input() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = write_fixture(&dir, "bad.csv", "name,query\nterm,How long?\n");

        let store = CsvTableStore::new();
        let err = store.read_questions(&input).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn writes_synthetic_rows_with_expected_header() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output = dir.path().join("rows.csv");
        let question = QuestionSpec::new("term", "How long?", 1);
        let rows = vec![SyntheticRow::new("Net 30", "Thirty days.")];

        let store = CsvTableStore::new();
        store
            .write_synthetic_rows(&output, &question, &rows)
            .await
            .expect("write failed");

        let written = std::fs::read_to_string(&output).expect("Failed to read output");
        assert_eq!(
            written,
            "field_name,field_question,answer,text\nterm,How long?,Net 30,Thirty days.\n"
        );
    }

    #[tokio::test]
    async fn detects_question_schema() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let questions = write_fixture(&dir, "q.csv", "field_name,field_question\na,b\n");
        let texts = write_fixture(&dir, "t.csv", "id,text\n1,x\n");

        let store = CsvTableStore::new();
        assert!(store.has_question_columns(&questions).await.unwrap());
        assert!(!store.has_question_columns(&texts).await.unwrap());
    }
}
