//! Format compatibility checks.
//!
//! A validator walks a [`Value`] tree depth-first and reports everything the
//! target format cannot hold. Problems are collected as values in a
//! [`ValidationResult`], split into errors (the document cannot be written)
//! and warnings (it can, but probably not as intended). Issue paths use `$`
//! for the root, `.key` for mapping entries and `[index]` for sequence
//! elements.
//!
//! # Examples
//!
//! ```
//! use dataconv::{validate, Value};
//!
//! let doc = Value::object([("ratio", Value::Float(f64::NAN))]);
//! let result = validate(&doc, "json").unwrap();
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.errors[0].path, "$.ratio");
//! ```

pub mod json;
pub mod toml;
pub mod xml;
pub mod yaml;

use std::fmt;

use tracing::{debug, info, warn};

pub use json::JsonValidator;
pub use toml::TomlValidator;
pub use xml::XmlValidator;
pub use yaml::YamlValidator;

use crate::{formats::FileFormat, value::Value};

/// Misuse of the validation subsystem. Format problems are never errors,
/// they are [`ValidationIssue`]s.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One problem found at one location of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when there are no errors; warnings don't count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
        });
    }

    pub fn add_warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
            severity: Severity::Warning,
        });
    }
}

/// Human-readable report, one bullet per issue.
impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = Vec::new();

        if !self.errors.is_empty() {
            lines.push("[X] Validation Errors:".to_string());
            lines.extend(self.errors.iter().map(bullet));
        }

        if !self.warnings.is_empty() {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push("[!] Validation Warnings:".to_string());
            lines.extend(self.warnings.iter().map(bullet));
        }

        if lines.is_empty() {
            lines.push("[+] Validation passed - no issues found".to_string());
        }

        f.write_str(&lines.join("\n"))
    }
}

fn bullet(issue: &ValidationIssue) -> String {
    format!("  • [{}] {}", issue.path, issue.message)
}

/// A side-effect-free tree walker for one target format.
pub trait Validator {
    /// Check `value`, which sits at `path` in the document.
    fn walk(&self, value: &Value, path: &str, result: &mut ValidationResult);

    /// Check a whole document rooted at `$`.
    fn validate(&self, value: &Value) -> ValidationResult {
        let mut result = ValidationResult::new();
        self.walk(value, "$", &mut result);
        result
    }
}

pub(crate) fn key_path(path: &str, key: &impl fmt::Display) -> String {
    format!("{}.{}", path, key)
}

pub(crate) fn index_path(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}

/// Validate `tree` for the format named by `format`.
///
/// # Errors
///
/// [`ValidationError::UnsupportedFormat`] for a tag outside
/// `json`, `toml`, `yaml`, `yml` and `xml`.
pub fn validate(tree: &Value, format: &str) -> Result<ValidationResult, ValidationError> {
    let format = FileFormat::from_tag(format)
        .ok_or_else(|| ValidationError::UnsupportedFormat(format.to_string()))?;
    Ok(validate_format(tree, format))
}

/// Typed form of [`validate`].
pub fn validate_format(tree: &Value, format: FileFormat) -> ValidationResult {
    debug!(format = format.tag(), "validating data");

    let result = match format {
        FileFormat::Json => JsonValidator.validate(tree),
        FileFormat::Toml => TomlValidator.validate(tree),
        FileFormat::Yaml => YamlValidator.validate(tree),
        FileFormat::Xml => XmlValidator.validate(tree),
    };

    if !result.errors.is_empty() {
        warn!(
            errors = result.errors.len(),
            format = format.tag(),
            "validation found errors"
        );
    }
    if !result.warnings.is_empty() {
        info!(
            warnings = result.warnings.len(),
            format = format.tag(),
            "validation found warnings"
        );
    }

    result
}
