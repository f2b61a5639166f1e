pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    CheckConnectionUseCase, EnhanceFileUseCase, EnhanceTextsUseCase, GenerationService,
    ProcessFolderUseCase, SynthesizeFromQuestionsUseCase, SynthesizeRowsUseCase, TableRepository,
};

pub use connector::{CsvTableStore, MockGeneration, OllamaClient};

pub use domain::{
    DomainError, GenerationConfig, QuestionSpec, SyntheticRow, TextTable, DEFAULT_BASE_URL,
    DEFAULT_MODEL, DEFAULT_ROWS_PER_QUESTION,
};
