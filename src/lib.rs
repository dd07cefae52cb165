pub mod cache;
pub mod cli;
pub mod config;
pub mod extractor;
pub mod generator;
pub mod i18n;
pub mod llm;
pub mod store;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::Config;
pub use extractor::{Expect, ExtractError, extract_structured, extract_value};
pub use generator::error::{Feature, GenerationError};
pub use generator::workflow::launch;
