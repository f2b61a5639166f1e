mod check_connection;
mod enhance_file;
mod enhance_texts;
mod process_folder;
mod synthesize_from_questions;
mod synthesize_rows;

pub use check_connection::*;
pub use enhance_file::*;
pub use enhance_texts::*;
pub use process_folder::*;
pub use synthesize_from_questions::*;
pub use synthesize_rows::*;
