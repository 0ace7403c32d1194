//! The full conversion pipeline: parse, load, process, validate, save

use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::{CliError, Session};
use crate::{
    evaluator,
    formats::FileFormat,
    io, parser,
    validation::{self, ValidationResult},
    value::Value,
};

/// Options for the convert command
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// The conversion query
    pub query: String,
    /// Validate only, don't write the destination
    pub dry_run: bool,
    /// Override the configured atomic-write setting
    pub atomic: Option<bool>,
}

/// What a conversion did
#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub format: FileFormat,
    /// Extraction path applied to the source, if any
    pub path: Option<String>,
    pub conditions: usize,
    /// Validation outcome for the destination format (never has errors)
    pub validation: ValidationResult,
    /// Things the user should know about that didn't stop the conversion
    pub notices: Vec<String>,
    /// False on a dry run
    pub saved: bool,
}

/// Wrap a list root for formats that need a mapping root.
///
/// TOML gets `{"root": list}`, XML gets `{"root": {"item": list}}`. Anything
/// else passes through.
pub fn wrap_for_format(value: Value, format: FileFormat) -> (Value, Option<&'static str>) {
    match value {
        Value::Array(items) if format.requires_mapping_root() => match format {
            FileFormat::Xml => (
                Value::object([("root", Value::object([("item", Value::Array(items))]))]),
                Some("Wrapping list in {'root': {'item': data}} for XML compatibility"),
            ),
            _ => (
                Value::object([("root", Value::Array(items))]),
                Some("Wrapping list in {'root': data} for TOML compatibility"),
            ),
        },
        value => (value, None),
    }
}

/// Run a conversion query end to end.
///
/// Validation errors abort with [`CliError::ValidationFailed`] before
/// anything is written.
pub fn execute_convert(
    session: &mut Session,
    options: &ConvertOptions,
) -> Result<ConvertReport, CliError> {
    let query = parser::parse_query(&options.query)?;
    debug!(?query, "parsed query");

    let source = PathBuf::from(&query.source.file);
    let destination = PathBuf::from(&query.dest.file);
    let mut notices = Vec::new();

    if query.dest.path.is_some() {
        warn!("path expressions on destination are ignored");
        notices.push("Path expressions on destination are ignored".to_string());
    }

    // Unknown destination formats fail before the source is read.
    let format = FileFormat::from_path(&destination)?;

    let document = session.load(&source)?;
    info!(path = %source.display(), "loaded source");

    let data = if query.source.path.is_some() || !query.conditions.is_empty() {
        let processed = evaluator::process(
            &document.value,
            query.source.path.as_deref(),
            &query.conditions,
        )?;
        info!("data processing completed");
        processed
    } else {
        document.value.clone()
    };

    let validation = validation::validate_format(&data, format);
    if !validation.is_valid() {
        return Err(CliError::ValidationFailed(validation));
    }

    let (data, wrap_notice) = wrap_for_format(data, format);
    if let Some(notice) = wrap_notice {
        warn!("{}", notice);
        notices.push(notice.to_string());
    }

    let saved = if options.dry_run {
        info!("dry run, output not saved");
        false
    } else {
        let mut save_options = session.config().save_options();
        if let Some(atomic) = options.atomic {
            save_options.atomic = atomic;
        }
        io::save(&data, &destination, &save_options)?;
        info!(path = %destination.display(), "saved output");
        true
    };

    Ok(ConvertReport {
        source,
        destination,
        format,
        path: query.source.path,
        conditions: query.conditions.len(),
        validation,
        notices,
        saved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mappings_are_never_wrapped() {
        let doc = Value::object([("a", Value::from(1))]);
        let (wrapped, notice) = wrap_for_format(doc.clone(), FileFormat::Toml);
        assert_eq!(wrapped, doc);
        assert!(notice.is_none());
    }

    #[test]
    fn lists_pass_through_for_json_and_yaml() {
        let list = Value::Array(vec![Value::from(1)]);
        assert_eq!(wrap_for_format(list.clone(), FileFormat::Json).0, list);
        assert_eq!(wrap_for_format(list.clone(), FileFormat::Yaml).0, list);
    }
}
