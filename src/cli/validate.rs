//! Check a file against a format's constraints

use std::path::PathBuf;

use super::{CliError, Session};
use crate::{
    formats::{FileFormat, FormatError},
    validation::{self, ValidationResult},
};

/// Options for the validate-file command
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    pub file: PathBuf,
    /// Validate as this format instead of the one the extension names
    pub format: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidateReport {
    pub file: PathBuf,
    pub format: FileFormat,
    pub result: ValidationResult,
}

/// Load the file and validate it. An invalid document is still an `Ok`
/// report; callers decide what to do with `result.is_valid()`.
pub fn execute_validate_file(
    session: &mut Session,
    options: &ValidateOptions,
) -> Result<ValidateReport, CliError> {
    let document = session.load(&options.file)?;

    let format = match &options.format {
        Some(tag) => FileFormat::from_tag(&tag.to_lowercase())
            .ok_or_else(|| FormatError::UnsupportedFormat(tag.clone()))?,
        None => document.format,
    };

    let result = validation::validate_format(&document.value, format);
    Ok(ValidateReport {
        file: options.file.clone(),
        format,
        result,
    })
}
