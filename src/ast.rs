//! # Query Language - Abstract Syntax Tree
//!
//! This module defines the tokens and syntax tree of the conversion query
//! language, a single-statement language naming a source document, a
//! destination document and an optional filter.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Comparison operators used in conditions
//! - **[query]** - Query, file path, path expression and condition nodes
//!
//! ## Quick Start
//!
//! ```text
//! from data.json[users.*] to active.yaml where age >= 18 and active == true
//! ```
//!
//! This query reads `data.json`, expands the `users` array, keeps the
//! adult active users and writes them as YAML.
//!
//! ## Grammar
//!
//! ```text
//! query          := "from" file_path "to" file_path ("where" condition_list)?
//! file_path      := (bare_path | quoted_string) path_bracket?
//! path_bracket   := "[" path_expr "]"
//! path_expr      := NAME ("." NAME)* ("." "*")?
//! condition_list := condition ("and" condition)*
//! condition      := NAME operator value
//! operator       := "==" | "!=" | ">" | "<" | ">=" | "<="
//! value          := quoted_string | signed_number | "true" | "false" | "null"
//! ```
//!
//! ## Core Concepts
//!
//! ### Paths
//!
//! A bracket after the source file selects part of the document. Segments
//! are field names; a final `.*` expands the array found at the previous
//! segment:
//!
//! ```text
//! from app.toml[database.host] to host.json
//! from data.json[users.*] to users.yaml
//! ```
//!
//! ### Conditions
//!
//! Conditions are AND-only. There is no `or`, no negation and no grouping.
//! Numbers are always read as doubles, so `age == 30` matches `30` and
//! `30.0` alike.
pub mod operators;
pub mod query;
pub mod tokens;

pub use operators::CompareOp;
pub use query::{Condition, ConditionList, FilePath, FileRef, LiteralNode, PathExpression, Query};
pub use tokens::{Token, TokenKind};
