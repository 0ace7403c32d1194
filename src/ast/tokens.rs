use std::fmt;

use crate::lexer::Position;

/// A lexical token with its source text and where it started.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text. For quoted strings this is the raw content between the
    /// quotes; for everything else it is the matched input.
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    /// True for tokens spelled like an identifier: NAME and the keywords.
    ///
    /// Where the grammar expects a NAME, keywords are read as plain names.
    pub fn is_word(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Name
                | TokenKind::From
                | TokenKind::To
                | TokenKind::Where
                | TokenKind::And
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    /// `from`
    From,

    /// `to`
    To,

    /// `where`
    Where,

    /// `and` (the only connective)
    And,

    /// `true`
    True,

    /// `false`
    False,

    /// `null`
    Null,

    // Literals and names
    /// File reference outside quotes
    ///
    /// Only produced right after `from` / `to`.
    ///
    /// # Examples
    /// ```text
    /// input.json
    /// ./data/users-2024.yaml
    /// ```
    BarePath,

    /// Double-quoted string, text holds the raw content
    ///
    /// # Examples
    /// ```text
    /// "my data.json"
    /// "active"
    /// ```
    String,

    /// Field or path segment name
    ///
    /// Must start with an ASCII letter or underscore.
    Name,

    /// Signed number, always read as a double downstream
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -1.5
    /// 2e10
    /// ```
    Number,

    // Comparison
    /// `==`
    EqEq,

    /// `!=`
    NotEq,

    /// `>`
    Gt,

    /// `<`
    Lt,

    /// `>=`
    GtEq,

    /// `<=`
    LtEq,

    // Path punctuation
    /// `[`
    LBracket,

    /// `]`
    RBracket,

    /// `.`
    Dot,

    /// `*` (wildcard, final segment only)
    Star,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Short description used in "expected ..." diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::From => "'from'",
            TokenKind::To => "'to'",
            TokenKind::Where => "'where'",
            TokenKind::And => "'and'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::BarePath => "file path",
            TokenKind::String => "quoted string",
            TokenKind::Name => "name",
            TokenKind::Number => "number",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Gt => "'>'",
            TokenKind::Lt => "'<'",
            TokenKind::GtEq => "'>='",
            TokenKind::LtEq => "'<='",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Dot => "'.'",
            TokenKind::Star => "'*'",
            TokenKind::Eof => "end of query",
        }
    }

    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "from" => Some(TokenKind::From),
            "to" => Some(TokenKind::To),
            "where" => Some(TokenKind::Where),
            "and" => Some(TokenKind::And),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "null" => Some(TokenKind::Null),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of query"),
            TokenKind::String => write!(f, "\"{}\"", self.text),
            _ => write!(f, "'{}'", self.text),
        }
    }
}
