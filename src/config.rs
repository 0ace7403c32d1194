//! Configuration for dataconv.
//!
//! Resolution order:
//! 1. `DATACONV_CONFIG` environment variable (path to a TOML file)
//! 2. `./dataconv.toml` if present
//! 3. Built-in defaults
//!
//! Missing fields fall back to their defaults; command-line flags override
//! whatever is loaded here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{formats::RenderOptions, io::SaveOptions};

pub const CONFIG_ENV: &str = "DATACONV_CONFIG";
pub const CONFIG_FILE: &str = "dataconv.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Write outputs through a temp file and rename.
    #[serde(default = "default_atomic_writes")]
    pub atomic_writes: bool,

    /// Spaces per indentation level in JSON output.
    #[serde(default = "default_json_indent")]
    pub json_indent: usize,

    /// Log filter used when neither `RUST_LOG` nor `--verbose` is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_atomic_writes() -> bool {
    true
}

fn default_json_indent() -> usize {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            atomic_writes: default_atomic_writes(),
            json_indent: default_json_indent(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load using the default resolution order.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }
        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            return Self::load_from(local);
        }
        debug!("no config file, using defaults");
        Ok(Self::default())
    }

    /// Load from an explicit file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn save_options(&self) -> SaveOptions {
        SaveOptions {
            atomic: self.atomic_writes,
            render: RenderOptions {
                json_indent: self.json_indent,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = Config::parse("json_indent = 4\n").unwrap();
        assert_eq!(config.json_indent, 4);
        assert!(config.atomic_writes);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn unreadable_file_is_reported() {
        let err = Config::load_from(Path::new("/nonexistent/dataconv.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
