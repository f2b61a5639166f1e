use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use datasynth::{
    CheckConnectionUseCase, CsvTableStore, EnhanceFileUseCase, EnhanceTextsUseCase,
    GenerationConfig, GenerationService, MockGeneration, OllamaClient, ProcessFolderUseCase,
    SynthesizeFromQuestionsUseCase, SynthesizeRowsUseCase, TableRepository,
    DEFAULT_ROWS_PER_QUESTION,
};

#[derive(Parser)]
#[command(name = "datasynth")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Generation server base URL (falls back to OLLAMA_BASE_URL, then the
    /// local loopback default)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Model identifier (falls back to OLLAMA_MODEL, then deepseek-r1)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Use a scripted in-memory generator instead of a live server
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the server and verify the configured model is available
    Check,

    /// Enhance the `text` column of one CSV file
    Enhance {
        input: PathBuf,

        /// Output path (default: `<stem>_with_filler.csv` beside the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate synthetic rows for every question in a CSV
    Synthesize {
        input: PathBuf,

        #[arg(long, default_value = "synthetic_data")]
        output_dir: PathBuf,

        /// Rows per question (falls back to ROWS_PER_QUESTION, then 100)
        #[arg(long)]
        rows_per_question: Option<usize>,
    },

    /// Enhance every CSV file in a folder
    Folder {
        #[arg(default_value = "field_name")]
        input_dir: PathBuf,

        #[arg(default_value = "synthetic_data")]
        output_dir: PathBuf,
    },

    /// Detect the input schema and dispatch to enhance or synthesize
    Process {
        input: PathBuf,

        /// Output path for the enhancement path (ignored for question files)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = GenerationConfig::resolve(cli.base_url.clone(), cli.model.clone());

    let generator: Arc<dyn GenerationService> = if cli.mock {
        info!("Using mock generation service");
        Arc::new(MockGeneration::with_model(&config.model))
    } else {
        Arc::new(OllamaClient::new(&config))
    };
    let tables: Arc<dyn TableRepository> = Arc::new(CsvTableStore::new());

    if !cli.mock {
        info!("Testing connection to {}", config.base_url);
        let check = CheckConnectionUseCase::new(generator.clone());
        match check.execute().await {
            Ok(true) => info!("Connected to generation server"),
            Ok(false) => anyhow::bail!(
                "Model '{}' not found on {}. Pull it first (ollama pull {})",
                config.model,
                config.base_url,
                config.model
            ),
            Err(e) => anyhow::bail!(
                "Cannot reach the generation server at {}: {}\n\
                 Make sure it is running (ollama serve)",
                config.base_url,
                e
            ),
        }
    }

    match cli.command {
        Commands::Check => {
            println!(
                "Server reachable and model '{}' available at {}",
                config.model, config.base_url
            );
        }

        Commands::Enhance { input, output } => {
            let use_case = EnhanceFileUseCase::new(
                tables.clone(),
                EnhanceTextsUseCase::new(generator.clone()),
            );
            let path = use_case.execute(&input, output.as_deref()).await?;
            println!("CSV processing completed successfully.");
            println!("Output file: {}", path.display());
        }

        Commands::Synthesize {
            input,
            output_dir,
            rows_per_question,
        } => {
            let use_case = SynthesizeFromQuestionsUseCase::new(
                tables.clone(),
                SynthesizeRowsUseCase::new(generator.clone()),
            )
            .with_rows_per_question(resolve_rows_per_question(rows_per_question));
            let paths = use_case.execute(&input, &output_dir).await?;
            println!("Synthetic data generation completed successfully.");
            println!(
                "Generated {} files in {}",
                paths.len(),
                output_dir.display()
            );
        }

        Commands::Folder {
            input_dir,
            output_dir,
        } => {
            let enhance_file = EnhanceFileUseCase::new(
                tables.clone(),
                EnhanceTextsUseCase::new(generator.clone()),
            );
            let use_case = ProcessFolderUseCase::new(enhance_file);
            let paths = use_case.execute(&input_dir, &output_dir).await?;
            println!("Folder processing completed successfully.");
            println!(
                "Processed {} files into {}",
                paths.len(),
                output_dir.display()
            );
        }

        Commands::Process { input, output } => {
            if tables.has_question_columns(&input).await? {
                let use_case = SynthesizeFromQuestionsUseCase::new(
                    tables.clone(),
                    SynthesizeRowsUseCase::new(generator.clone()),
                )
                .with_rows_per_question(resolve_rows_per_question(None));
                let paths = use_case.execute(&input, &PathBuf::from("synthetic_data")).await?;
                println!("Synthetic data generation completed successfully.");
                println!("Generated {} files in synthetic_data", paths.len());
            } else {
                let use_case = EnhanceFileUseCase::new(
                    tables.clone(),
                    EnhanceTextsUseCase::new(generator.clone()),
                );
                let path = use_case.execute(&input, output.as_deref()).await?;
                println!("CSV processing completed successfully.");
                println!("Output file: {}", path.display());
            }
        }
    }

    Ok(())
}

fn resolve_rows_per_question(flag: Option<usize>) -> usize {
    flag.or_else(|| {
        std::env::var("ROWS_PER_QUESTION")
            .ok()
            .and_then(|v| v.parse().ok())
    })
    .unwrap_or(DEFAULT_ROWS_PER_QUESTION)
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn folder_command_has_defaults() {
        let cli = Cli::try_parse_from(["datasynth", "folder"]).expect("parse failed");
        match cli.command {
            Commands::Folder {
                input_dir,
                output_dir,
            } => {
                assert_eq!(input_dir, PathBuf::from("field_name"));
                assert_eq!(output_dir, PathBuf::from("synthetic_data"));
            }
            _ => panic!("expected folder command"),
        }
    }

    #[test]
    fn enhance_requires_an_input() {
        let res = Cli::try_parse_from(["datasynth", "enhance"]);
        assert!(res.is_err(), "enhance without input should not parse");
    }
}
