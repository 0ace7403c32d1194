//! Explicit CLI context: configuration plus the document being worked on

use std::path::{Path, PathBuf};

use crate::{config::Config, formats::FileFormat, io, value::Value};

use super::CliError;

/// A document read from disk
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub format: FileFormat,
    pub value: Value,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    config: Config,
    current: Option<LoadedDocument>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Session {
            config,
            current: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load `path`, replacing whatever document was current.
    pub fn load(&mut self, path: &Path) -> Result<&LoadedDocument, CliError> {
        let value = io::load(path)?;
        let format = FileFormat::from_path(path)?;
        Ok(&*self.current.insert(LoadedDocument {
            path: path.to_path_buf(),
            format,
            value,
        }))
    }

    pub fn current(&self) -> Option<&LoadedDocument> {
        self.current.as_ref()
    }

    pub fn take(&mut self) -> Option<LoadedDocument> {
        self.current.take()
    }
}
