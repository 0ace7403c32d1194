use crate::{ast::CompareOp, lexer::Position};

/// Parsed query, before transformation into a
/// [`ConversionQuery`](crate::query::ConversionQuery).
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// File after `from`
    pub source: FilePath,

    /// File after `to`
    pub dest: FilePath,

    /// `where` clause, if present
    pub conditions: Option<ConditionList>,
}

/// A file reference with an optional `[path]` bracket.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePath {
    pub file: FileRef,
    pub path: Option<PathExpression>,
    pub position: Position,
}

/// How the file was written in the query.
#[derive(Debug, Clone, PartialEq)]
pub enum FileRef {
    /// `data/input.json`
    Bare(String),
    /// `"my data.json"`, quotes already stripped
    Quoted(String),
}

impl FileRef {
    pub fn into_string(self) -> String {
        match self {
            FileRef::Bare(s) | FileRef::Quoted(s) => s,
        }
    }
}

/// Dotted field path inside a bracket, e.g. `users.*`.
///
/// The wildcard always belongs to the last name.
#[derive(Debug, Clone, PartialEq)]
pub struct PathExpression {
    pub names: Vec<String>,
    pub wildcard: bool,
}

/// Conditions joined by `and`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionList(pub Vec<Condition>);

/// `field op value`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub op: CompareOp,
    pub value: LiteralNode,
    pub position: Position,
}

/// Right-hand side of a condition as written.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralNode {
    /// Raw string content without the surrounding quotes
    String(String),
    /// Numeric literal text, converted to a double by the transform
    Number(String),
    Boolean(bool),
    Null,
}
