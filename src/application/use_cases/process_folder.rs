use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::application::EnhanceFileUseCase;
use crate::domain::DomainError;

/// Runs every CSV file directly inside a folder through the enhancement
/// pipeline, writing results under the output folder with the same file
/// names. A file that fails is logged and skipped; the rest continue.
pub struct ProcessFolderUseCase {
    enhance_file: EnhanceFileUseCase,
}

impl ProcessFolderUseCase {
    pub fn new(enhance_file: EnhanceFileUseCase) -> Self {
        Self { enhance_file }
    }

    /// Returns the paths written, in input order.
    pub async fn execute(
        &self,
        input_dir: &Path,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, DomainError> {
        if !input_dir.is_dir() {
            return Err(DomainError::not_found(format!(
                "Input folder not found: {}",
                input_dir.display()
            )));
        }
        std::fs::create_dir_all(output_dir)?;

        let mut csv_files: Vec<PathBuf> = WalkDir::new(input_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            })
            .map(|entry| entry.into_path())
            .collect();
        csv_files.sort();

        if csv_files.is_empty() {
            warn!("No CSV files found in {}", input_dir.display());
            return Ok(Vec::new());
        }
        info!(
            "Found {} CSV files in {}",
            csv_files.len(),
            input_dir.display()
        );

        let progress_bar = ProgressBar::new(csv_files.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );

        let mut processed = Vec::new();
        for file in csv_files {
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            progress_bar.set_message(file_name.clone());

            let output = output_dir.join(&file_name);
            match self.enhance_file.execute(&file, Some(&output)).await {
                Ok(path) => {
                    info!("Successfully processed {}", file_name);
                    processed.push(path);
                }
                Err(e) => {
                    warn!("Failed to process {}: {}", file.display(), e);
                }
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        info!(
            "Processed {} of the found files into {}",
            processed.len(),
            output_dir.display()
        );
        Ok(processed)
    }
}
