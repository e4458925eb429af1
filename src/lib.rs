pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod logging;
pub mod parser;
pub mod render;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::DraftError;
pub use generator::workflow::launch;
pub use parser::{extract, linkify};
