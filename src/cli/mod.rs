//! CLI support for dataconv
//!
//! The command implementations live here as plain functions over a
//! [`Session`], so they can be embedded and tested without the binary.

mod check;
mod convert;
mod docs;
mod session;
mod validate;

pub use check::execute_check;
pub use convert::{ConvertOptions, ConvertReport, execute_convert, wrap_for_format};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use session::{LoadedDocument, Session};
pub use validate::{ValidateOptions, ValidateReport, execute_validate_file};

use crate::{
    config::ConfigError, evaluator::ProcessorError, formats::FormatError, io::IoError,
    parser::ParseError, validation::ValidationResult,
};

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Processing error: {0}")]
    Processor(#[from] ProcessorError),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read stdin: {0}")]
    Stdin(#[from] std::io::Error),

    /// No query given and nothing piped in
    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    /// Conversion stopped because the output would be invalid
    #[error("{0}\n\nAborting due to validation errors. Fix the issues above.")]
    ValidationFailed(ValidationResult),

    /// Unknown documentation topic
    #[error("Unknown topic: '{0}'\nRun 'dataconv docs' to see available topics.")]
    UnknownCategory(String),
}
