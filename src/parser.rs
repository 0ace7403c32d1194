use std::mem;

use tracing::{debug, error, info};

use crate::{
    ast::{
        CompareOp, Condition, ConditionList, FilePath, FileRef, LiteralNode, PathExpression,
        Query, Token, TokenKind,
    },
    lexer::{LexError, Lexer, Position},
    query::ConversionQuery,
    transform,
};

/// Errors raised while parsing query text. Parsing is all-or-nothing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid query syntax: {0}")]
    Lex(#[from] LexError),

    #[error("Invalid query syntax: expected {expected}, found {found} at {position}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("Invalid query syntax: unexpected {found} at {position}, expected end of query")]
    TrailingInput { found: String, position: Position },

    #[error("Invalid query syntax: invalid number '{text}' at {position}")]
    InvalidNumber { text: String, position: Position },
}

impl ParseError {
    /// Where in the query text the problem was found.
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::UnexpectedToken { position, .. }
            | ParseError::TrailingInput { position, .. }
            | ParseError::InvalidNumber { position, .. } => *position,
        }
    }
}

/// Which lexer mode produces the next lookahead token.
#[derive(Clone, Copy)]
enum Next {
    Default,
    File,
}

/// Recursive-descent parser with one token of lookahead.
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    /// Consume the current token, lexing the next one in the given mode.
    fn bump(&mut self, next: Next) -> Result<Token, ParseError> {
        let token = match next {
            Next::Default => self.lexer.next_token()?,
            Next::File => self.lexer.next_file_token()?,
        };
        Ok(mem::replace(&mut self.current_token, token))
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current_token.to_string(),
            position: self.current_token.position,
        }
    }

    fn expect(&mut self, kind: TokenKind, next: Next) -> Result<Token, ParseError> {
        if !self.check(kind) {
            return Err(self.unexpected(kind.describe()));
        }
        self.bump(next)
    }

    /// NAME, or a keyword standing in a name position.
    fn expect_name(&mut self) -> Result<String, ParseError> {
        if !self.current_token.is_word() {
            return Err(self.unexpected("name"));
        }
        Ok(self.bump(Next::Default)?.text)
    }

    /// Parse a full query and require the input to end after it.
    pub fn parse_query(&mut self) -> Result<Query, ParseError> {
        self.expect(TokenKind::From, Next::File)?;
        let source = self.parse_file_path()?;

        self.expect(TokenKind::To, Next::File)?;
        let dest = self.parse_file_path()?;

        let conditions = if self.check(TokenKind::Where) {
            self.bump(Next::Default)?;
            Some(self.parse_condition_list()?)
        } else {
            None
        };

        if !self.check(TokenKind::Eof) {
            return Err(ParseError::TrailingInput {
                found: self.current_token.to_string(),
                position: self.current_token.position,
            });
        }

        Ok(Query {
            source,
            dest,
            conditions,
        })
    }

    fn parse_file_path(&mut self) -> Result<FilePath, ParseError> {
        let position = self.current_token.position;
        let file = match self.current_token.kind {
            TokenKind::BarePath => FileRef::Bare(self.bump(Next::Default)?.text),
            TokenKind::String => FileRef::Quoted(self.bump(Next::Default)?.text),
            _ => return Err(self.unexpected("file path")),
        };

        let path = if self.check(TokenKind::LBracket) {
            self.bump(Next::Default)?;
            let path = self.parse_path_expression()?;
            self.expect(TokenKind::RBracket, Next::Default)?;
            Some(path)
        } else {
            None
        };

        Ok(FilePath {
            file,
            path,
            position,
        })
    }

    /// `NAME ("." NAME)* ("." "*")?`
    fn parse_path_expression(&mut self) -> Result<PathExpression, ParseError> {
        let mut names = vec![self.expect_name()?];
        let mut wildcard = false;

        while self.check(TokenKind::Dot) {
            self.bump(Next::Default)?;
            if self.check(TokenKind::Star) {
                self.bump(Next::Default)?;
                wildcard = true;
                break;
            }
            names.push(self.expect_name()?);
        }

        Ok(PathExpression { names, wildcard })
    }

    fn parse_condition_list(&mut self) -> Result<ConditionList, ParseError> {
        let mut conditions = vec![self.parse_condition()?];
        while self.check(TokenKind::And) {
            self.bump(Next::Default)?;
            conditions.push(self.parse_condition()?);
        }
        Ok(ConditionList(conditions))
    }

    fn parse_condition(&mut self) -> Result<Condition, ParseError> {
        let position = self.current_token.position;
        let field = self.expect_name()?;

        let op = match self.current_token.kind {
            TokenKind::EqEq => CompareOp::Equal,
            TokenKind::NotEq => CompareOp::NotEqual,
            TokenKind::Gt => CompareOp::GreaterThan,
            TokenKind::Lt => CompareOp::LessThan,
            TokenKind::GtEq => CompareOp::GreaterEqual,
            TokenKind::LtEq => CompareOp::LessEqual,
            _ => return Err(self.unexpected("comparison operator")),
        };
        self.bump(Next::Default)?;

        let value = self.parse_value()?;

        Ok(Condition {
            field,
            op,
            value,
            position,
        })
    }

    fn parse_value(&mut self) -> Result<LiteralNode, ParseError> {
        let value = match self.current_token.kind {
            TokenKind::String => LiteralNode::String(self.current_token.text.clone()),
            TokenKind::Number => LiteralNode::Number(self.current_token.text.clone()),
            TokenKind::True => LiteralNode::Boolean(true),
            TokenKind::False => LiteralNode::Boolean(false),
            TokenKind::Null => LiteralNode::Null,
            _ => return Err(self.unexpected("value")),
        };
        self.bump(Next::Default)?;
        Ok(value)
    }
}

/// Parse query text straight into a [`ConversionQuery`].
///
/// # Examples
///
/// ```
/// use dataconv::parse_query;
///
/// let query = parse_query("from data.json[users.*] to out.yaml where age > 25").unwrap();
/// assert_eq!(query.source.file, "data.json");
/// assert_eq!(query.source.path.as_deref(), Some("users.*"));
/// assert_eq!(query.conditions.len(), 1);
/// ```
pub fn parse_query(input: &str) -> Result<ConversionQuery, ParseError> {
    debug!(query = input, "parsing query");

    let result = Parser::new(Lexer::new(input))
        .and_then(|mut parser| parser.parse_query())
        .and_then(transform::to_descriptor);

    match &result {
        Ok(_) => info!(query = input, "parsed query"),
        Err(e) => error!(query = input, error = %e, "failed to parse query"),
    }
    result
}
