mod generation_service;
mod table_repository;

pub use generation_service::*;
pub use table_repository::*;
