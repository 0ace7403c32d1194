pub mod ast;
pub mod cli;
pub mod config;
pub mod evaluator;
pub mod formats;
pub mod io;
pub mod lexer;
pub mod parser;
pub mod path;
pub mod query;
pub mod transform;
pub mod validation;
pub mod value;

pub use ast::{CompareOp, Token, TokenKind};
pub use config::{Config, ConfigError};
pub use evaluator::{ProcessorError, apply_conditions, compare, evaluate_condition, process};
pub use formats::{FileFormat, FormatError, RenderOptions};
pub use io::{IoError, SaveOptions, load, save};
pub use lexer::{LexError, Lexer, Position};
pub use parser::{ParseError, Parser, parse_query};
pub use path::{PathExpr, PathSegment};
pub use query::{Condition, ConversionQuery, Literal, PathSpec};
pub use validation::{
    Severity, ValidationError, ValidationIssue, ValidationResult, Validator, validate,
    validate_format,
};
pub use value::{Key, Map, Temporal, Value, ValueKind};
