//! Supported document formats and their conversion to and from [`Value`].
//!
//! Each submodule exposes `parse(&str) -> Result<Value, FormatError>` and
//! `render(&Value, ..) -> Result<String, FormatError>`; [`FileFormat`]
//! dispatches between them.

pub mod json;
pub mod toml;
pub mod xml;
pub mod yaml;

use std::{fmt, path::Path, str::FromStr};

use crate::value::Value;

/// Target/source document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Json,
    Toml,
    Yaml,
    Xml,
}

/// Errors from reading or writing a document in a given format.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Unsupported file format: {0}. Supported formats: json, toml, yaml, yml, xml")]
    UnsupportedFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] ::toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWrite(#[from] ::toml::ser::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The tree holds something the format has no way to express
    #[error("Cannot write {format}: {reason}")]
    Unrepresentable { format: FileFormat, reason: String },
}

impl FormatError {
    pub(crate) fn unrepresentable(format: FileFormat, reason: impl Into<String>) -> Self {
        FormatError::Unrepresentable {
            format,
            reason: reason.into(),
        }
    }
}

/// Serializer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per JSON indentation level
    pub json_indent: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { json_indent: 2 }
    }
}

impl FileFormat {
    pub const ALL: [FileFormat; 4] = [
        FileFormat::Json,
        FileFormat::Toml,
        FileFormat::Yaml,
        FileFormat::Xml,
    ];

    /// Canonical tag: `json`, `toml`, `yaml` or `xml`.
    pub fn tag(self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Toml => "toml",
            FileFormat::Yaml => "yaml",
            FileFormat::Xml => "xml",
        }
    }

    /// Exact tag lookup. `yml` is accepted as YAML; nothing else is.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "yaml" | "yml" => Some(FileFormat::Yaml),
            "xml" => Some(FileFormat::Xml),
            _ => None,
        }
    }

    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        FileFormat::from_tag(&extension).ok_or(FormatError::UnsupportedFormat(extension))
    }

    /// Whether the document root has to be a mapping.
    pub fn requires_mapping_root(self) -> bool {
        matches!(self, FileFormat::Toml | FileFormat::Xml)
    }

    pub fn parse(self, input: &str) -> Result<Value, FormatError> {
        match self {
            FileFormat::Json => json::parse(input),
            FileFormat::Toml => toml::parse(input),
            FileFormat::Yaml => yaml::parse(input),
            FileFormat::Xml => xml::parse(input),
        }
    }

    pub fn render(self, value: &Value, options: &RenderOptions) -> Result<String, FormatError> {
        match self {
            FileFormat::Json => json::render(value, options.json_indent),
            FileFormat::Toml => toml::render(value),
            FileFormat::Yaml => yaml::render(value),
            FileFormat::Xml => xml::render(value),
        }
    }
}

impl FromStr for FileFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileFormat::from_tag(s).ok_or_else(|| FormatError::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
