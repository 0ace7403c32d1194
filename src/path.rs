//! Restricted dotted-path extraction.
//!
//! Supports exactly what the query language can express: field names
//! separated by dots, with an optional final `.*` that expands the array
//! found at the previous segment. No indices, predicates or recursive
//! descent.

use std::{fmt, str::FromStr};

use tracing::{debug, info, warn};

use crate::{evaluator::ProcessorError, value::Value};

/// One field step. `wildcard` means "the field holds an array, continue
/// with each element".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub name: String,
    pub wildcard: bool,
}

/// A validated path expression such as `users.*` or `config.db.host`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    segments: Vec<PathSegment>,
}

impl PathExpr {
    /// Parse a dotted path. A final `*` segment folds onto the segment
    /// before it.
    ///
    /// # Errors
    ///
    /// [`ProcessorError::InvalidPath`] for an empty segment, a wildcard
    /// anywhere but the end, or a `*` glued to a name.
    pub fn parse(expression: &str) -> Result<Self, ProcessorError> {
        let invalid = |reason: &str| ProcessorError::InvalidPath {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = expression.split('.').collect();
        let last = parts.len() - 1;
        let mut segments: Vec<PathSegment> = Vec::with_capacity(parts.len());

        for (i, part) in parts.into_iter().enumerate() {
            if part == "*" {
                if i != last {
                    return Err(invalid("wildcard must be the final segment"));
                }
                match segments.last_mut() {
                    Some(segment) => segment.wildcard = true,
                    None => return Err(invalid("wildcard must follow a field name")),
                }
                continue;
            }
            if part.is_empty() {
                return Err(invalid("empty segment"));
            }
            if part.contains('*') {
                return Err(invalid("wildcard must be a separate final segment"));
            }
            segments.push(PathSegment {
                name: part.to_string(),
                wildcard: false,
            });
        }

        Ok(PathExpr { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Extract the matching part of `tree`.
    ///
    /// - exactly one match is returned as-is
    /// - several matches come back as an array in document order
    /// - no match gives an empty array
    pub fn evaluate(&self, tree: &Value) -> Value {
        let mut matches = Vec::new();
        collect(tree, &self.segments, &mut matches);

        match matches.as_slice() {
            [] => {
                warn!(path = %self, "path matched no results");
                Value::Array(Vec::new())
            }
            [single] => {
                info!(path = %self, "path matched 1 result");
                (*single).clone()
            }
            many => {
                info!(path = %self, count = many.len(), "path matched multiple results");
                Value::Array(many.iter().map(|v| (*v).clone()).collect())
            }
        }
    }
}

fn collect<'a>(focus: &'a Value, segments: &[PathSegment], out: &mut Vec<&'a Value>) {
    let Some((segment, rest)) = segments.split_first() else {
        out.push(focus);
        return;
    };

    // Missing key and non-object focus are both "no match".
    let Some(child) = focus.get(&segment.name) else {
        return;
    };

    if !segment.wildcard {
        collect(child, rest, out);
        return;
    }

    if let Value::Array(items) = child {
        for item in items {
            collect(item, rest, out);
        }
    }
}

impl FromStr for PathExpr {
    type Err = ProcessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathExpr::parse(s)
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&segment.name)?;
            if segment.wildcard {
                f.write_str(".*")?;
            }
        }
        Ok(())
    }
}

/// Apply an optional path to a tree. No path (or an empty one) returns the
/// tree unchanged.
pub fn evaluate(tree: &Value, path: Option<&str>) -> Result<Value, ProcessorError> {
    match path {
        None | Some("") => {
            debug!("no path given, returning data unchanged");
            Ok(tree.clone())
        }
        Some(expression) => {
            debug!(path = expression, "applying path");
            Ok(PathExpr::parse(expression)?.evaluate(tree))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_star_folds_onto_previous_segment() {
        let path = PathExpr::parse("data.users.*").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment {
                    name: "data".into(),
                    wildcard: false
                },
                PathSegment {
                    name: "users".into(),
                    wildcard: true
                },
            ]
        );
        assert_eq!(path.to_string(), "data.users.*");
    }

    #[test]
    fn malformed_paths_are_rejected() {
        for expression in ["a..b", ".a", "a.", "*", "a.*.b", "a*", "a.*.*"] {
            assert!(
                matches!(
                    PathExpr::parse(expression),
                    Err(ProcessorError::InvalidPath { .. })
                ),
                "expected {:?} to be rejected",
                expression
            );
        }
    }
}
