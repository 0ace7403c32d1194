//! Loading and saving documents, with the format picked from the file
//! extension.
//!
//! Saves are atomic by default: the document is written to a temporary file
//! next to the destination and renamed into place, so a failed write never
//! leaves a half-written file behind.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, error, info};

use crate::{
    formats::{FileFormat, FormatError, RenderOptions},
    value::Value,
};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error loading file {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("Error saving file {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl IoError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        IoError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// How [`save`] writes its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    /// Write to a temp file and rename it into place
    pub atomic: bool,
    pub render: RenderOptions,
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions {
            atomic: true,
            render: RenderOptions::default(),
        }
    }
}

/// Read and parse a document.
///
/// # Errors
///
/// - [`IoError::Format`] if the extension is not a supported format
/// - [`IoError::NotFound`] if the file doesn't exist
/// - [`IoError::Load`] if the content doesn't parse
pub fn load(path: &Path) -> Result<Value, IoError> {
    debug!(path = %path.display(), "loading file");

    let format = FileFormat::from_path(path)?;
    if !path.exists() {
        error!(path = %path.display(), "file not found");
        return Err(IoError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| IoError::io(path, e))?;
    let value = format.parse(&content).map_err(|source| {
        error!(path = %path.display(), %source, "failed to load file");
        IoError::Load {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(format = format.tag(), path = %path.display(), "loaded file");
    Ok(value)
}

/// Render `value` in the format named by the extension of `path` and write
/// it out, creating parent directories as needed.
pub fn save(value: &Value, path: &Path, options: &SaveOptions) -> Result<(), IoError> {
    debug!(path = %path.display(), atomic = options.atomic, "saving file");

    let format = FileFormat::from_path(path)?;
    let rendered = format.render(value, &options.render).map_err(|source| {
        error!(path = %path.display(), %source, "failed to save file");
        IoError::Save {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| IoError::io(parent, e))?;

    if options.atomic {
        write_atomic(path, parent, rendered.as_bytes())?;
    } else {
        std::fs::write(path, rendered).map_err(|e| IoError::io(path, e))?;
    }

    info!(format = format.tag(), path = %path.display(), "saved file");
    Ok(())
}

/// The temp file is deleted on drop if anything fails before the rename.
fn write_atomic(path: &Path, dir: &Path, contents: &[u8]) -> Result<(), IoError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{}.", file_name))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| IoError::io(dir, e))?;

    temp.write_all(contents).map_err(|e| IoError::io(temp.path(), e))?;
    temp.as_file().sync_all().map_err(|e| IoError::io(temp.path(), e))?;

    let temp_path = temp.path().to_path_buf();
    temp.persist(path).map_err(|e| IoError::io(path, e.error))?;
    debug!(from = %temp_path.display(), to = %path.display(), "atomic write completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_extension_fails_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out.csv");
        let err = save(&Value::Null, &target, &SaveOptions::default()).unwrap_err();
        assert!(matches!(err, IoError::Format(FormatError::UnsupportedFormat(_))));
        assert!(!dir.path().join("nested").exists());
    }
}
