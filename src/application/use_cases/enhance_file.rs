use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::application::{EnhanceTextsUseCase, TableRepository};
use crate::domain::DomainError;

/// Enhances the `text` column of one CSV file in place.
///
/// All other columns and the row order are preserved; rows whose text cell
/// is empty pass through untouched and are never sent to the model.
pub struct EnhanceFileUseCase {
    tables: Arc<dyn TableRepository>,
    enhancer: EnhanceTextsUseCase,
}

impl EnhanceFileUseCase {
    pub fn new(tables: Arc<dyn TableRepository>, enhancer: EnhanceTextsUseCase) -> Self {
        Self { tables, enhancer }
    }

    /// Process `input` and write the result to `output`, or to
    /// `<stem>_with_filler.csv` beside the input when no output is given.
    /// Returns the path written.
    pub async fn execute(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<PathBuf, DomainError> {
        let output = match output {
            Some(path) => path.to_path_buf(),
            None => default_output_path(input),
        };

        let mut table = self.tables.read_text_table(input).await?;
        info!("Processing {} rows from {}", table.len(), input.display());

        let pending = table.non_empty_texts()?;
        info!("Found {} texts to enhance", pending.len());

        if !pending.is_empty() {
            let texts: Vec<String> = pending.iter().map(|(_, text)| text.clone()).collect();
            let enhanced = self.enhancer.execute(&texts).await;

            for ((index, _), text) in pending.into_iter().zip(enhanced) {
                table.set_text(index, text)?;
            }
        }

        self.tables.write_text_table(&output, &table).await?;
        info!("Processed CSV saved to {}", output.display());
        Ok(output)
    }
}

/// `contracts.csv` → `contracts_with_filler.csv`, next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_with_filler.csv", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_keeps_directory_and_appends_suffix() {
        let path = default_output_path(Path::new("data/contracts.csv"));
        assert_eq!(path, Path::new("data/contracts_with_filler.csv"));
    }
}
