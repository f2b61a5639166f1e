mod mock_generation;
mod ollama_client;

pub use mock_generation::*;
pub use ollama_client::*;
