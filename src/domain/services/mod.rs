//! Pure domain services: response parsing, JSON extraction, prompt assembly.

pub mod json_extract;
pub mod prompt_builder;
pub mod response_parser;

pub use json_extract::*;
pub use response_parser::*;
