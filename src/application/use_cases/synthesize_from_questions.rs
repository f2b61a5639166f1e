use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::application::{SynthesizeRowsUseCase, TableRepository};
use crate::domain::{DomainError, DEFAULT_ROWS_PER_QUESTION};

/// Generates a synthetic dataset from a CSV of questions.
///
/// For every `field_name, field_question` row, one output CSV named
/// `NN_<field_name>.csv` is written into the output folder with exactly
/// `rows_per_question` synthetic rows.
pub struct SynthesizeFromQuestionsUseCase {
    tables: Arc<dyn TableRepository>,
    synthesizer: SynthesizeRowsUseCase,
    rows_per_question: usize,
}

impl SynthesizeFromQuestionsUseCase {
    pub fn new(tables: Arc<dyn TableRepository>, synthesizer: SynthesizeRowsUseCase) -> Self {
        Self {
            tables,
            synthesizer,
            rows_per_question: DEFAULT_ROWS_PER_QUESTION,
        }
    }

    pub fn with_rows_per_question(mut self, rows: usize) -> Self {
        self.rows_per_question = rows;
        self
    }

    /// Returns the generated file paths, one per question, in input order.
    pub async fn execute(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, DomainError> {
        let questions = self.tables.read_questions(input).await?;
        std::fs::create_dir_all(output_dir)?;

        info!(
            "Generating {} rows for each of {} questions",
            self.rows_per_question,
            questions.len()
        );

        let progress_bar = ProgressBar::new(questions.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );

        let mut generated = Vec::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            progress_bar.set_message(question.field_name().to_string());
            debug!(
                "Generating {} synthetic rows for '{}'",
                self.rows_per_question,
                question.field_name()
            );

            let rows = self
                .synthesizer
                .execute(question, self.rows_per_question)
                .await;

            let file_name = format!("{:02}_{}.csv", position + 1, question.safe_file_name());
            let path = output_dir.join(file_name);
            self.tables
                .write_synthetic_rows(&path, question, &rows)
                .await?;

            info!("Saved {}", path.display());
            generated.push(path);
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        info!(
            "Generated {} files to {}",
            generated.len(),
            output_dir.display()
        );
        Ok(generated)
    }
}
