//! # Domain Layer
//!
//! Core models and pure services. This layer is independent of the HTTP
//! transport, the CSV boundary, and the CLI.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
