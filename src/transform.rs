//! AST → [`ConversionQuery`] transform.

use crate::{
    ast::{self, LiteralNode},
    parser::ParseError,
    query::{Condition, ConversionQuery, Literal, PathSpec},
};

/// Turn a parsed query into its descriptor.
///
/// The only fallible step is number conversion; the lexer already checked
/// the literal's shape.
pub fn to_descriptor(query: ast::Query) -> Result<ConversionQuery, ParseError> {
    let conditions = match query.conditions {
        Some(ast::ConditionList(list)) => list
            .into_iter()
            .map(to_condition)
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(ConversionQuery {
        source: to_path_spec(query.source),
        dest: to_path_spec(query.dest),
        conditions,
    })
}

fn to_path_spec(file_path: ast::FilePath) -> PathSpec {
    PathSpec {
        file: file_path.file.into_string(),
        path: file_path.path.as_ref().map(render_path),
    }
}

/// Render a path expression in dotted form, the wildcard as a final `.*`.
pub fn render_path(path: &ast::PathExpression) -> String {
    let mut rendered = path.names.join(".");
    if path.wildcard {
        rendered.push_str(".*");
    }
    rendered
}

fn to_condition(condition: ast::Condition) -> Result<Condition, ParseError> {
    let value = match condition.value {
        LiteralNode::String(s) => Literal::String(s),
        LiteralNode::Number(text) => match text.parse::<f64>() {
            Ok(n) => Literal::Number(n),
            Err(_) => {
                return Err(ParseError::InvalidNumber {
                    text,
                    position: condition.position,
                });
            }
        },
        LiteralNode::Boolean(b) => Literal::Boolean(b),
        LiteralNode::Null => Literal::Null,
    };

    Ok(Condition {
        field: condition.field,
        operator: condition.op,
        value,
    })
}
