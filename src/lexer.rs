use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::ast::{Token, TokenKind};

/// File reference outside quotes. Only tried right after `from` / `to`.
static FILE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_\-/.]+").expect("valid file path pattern"));

/// Signed integer, decimal or exponent number.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number pattern")
});

/// Location of a token in the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Character offset from the start of the query (0-based)
    pub offset: usize,
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors raised while scanning query text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at {position}")]
    UnexpectedChar { ch: char, position: Position },

    #[error("Unexpected '{ch}' at {position} (did you mean '{ch}='?)")]
    IncompleteOperator { ch: char, position: Position },

    #[error("Unterminated string starting at {position}: missing closing quote")]
    UnterminatedString { position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedChar { position, .. }
            | LexError::IncompleteOperator { position, .. }
            | LexError::UnterminatedString { position } => *position,
        }
    }
}

/// Single-pass tokenizer for query text.
///
/// The lexer has two modes. [`next_token`](Lexer::next_token) reads
/// keywords, names, operators, numbers and path punctuation;
/// [`next_file_token`](Lexer::next_file_token) additionally recognises bare
/// file paths such as `data/input.json`, which would otherwise split into
/// names and dots. The parser picks the mode, so no token is ever re-read.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    fn here(&self) -> Position {
        Position {
            offset: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn rest(&self) -> String {
        self.input[self.position..].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Read a double-quoted string. A backslash keeps the next character
    /// from closing the string; both characters are kept as written.
    fn read_string(&mut self) -> Result<Token, LexError> {
        let start = self.here();
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(Token::new(TokenKind::String, result, start));
                }
                '\\' => {
                    result.push(ch);
                    self.advance();
                    if let Some(escaped) = self.current_char() {
                        result.push(escaped);
                        self.advance();
                    }
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_pattern(&mut self, pattern: &Regex, kind: TokenKind) -> Option<Token> {
        let start = self.here();
        let rest = self.rest();
        let matched = pattern.find(&rest)?.as_str().to_string();
        self.advance_by(matched.chars().count());
        Some(Token::new(kind, matched, start))
    }

    fn symbol(&mut self, kind: TokenKind, len: usize) -> Token {
        let start = self.here();
        let text: String = self.input[self.position..self.position + len].iter().collect();
        self.advance_by(len);
        Token::new(kind, text, start)
    }

    /// Token in a position where a file reference is expected.
    pub fn next_file_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        match self.current_char() {
            Some('"') => self.read_string(),
            Some(_) => match self.read_pattern(&FILE_PATH, TokenKind::BarePath) {
                Some(token) => Ok(token),
                None => self.next_token(),
            },
            None => self.next_token(),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(Token::new(TokenKind::Eof, "", self.here())),
            Some('[') => Ok(self.symbol(TokenKind::LBracket, 1)),
            Some(']') => Ok(self.symbol(TokenKind::RBracket, 1)),
            Some('*') => Ok(self.symbol(TokenKind::Star, 1)),
            Some('.') if !self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                Ok(self.symbol(TokenKind::Dot, 1))
            }
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    Ok(self.symbol(TokenKind::EqEq, 2))
                } else {
                    Err(LexError::IncompleteOperator {
                        ch: '=',
                        position: self.here(),
                    })
                }
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    Ok(self.symbol(TokenKind::NotEq, 2))
                } else {
                    Err(LexError::IncompleteOperator {
                        ch: '!',
                        position: self.here(),
                    })
                }
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    Ok(self.symbol(TokenKind::GtEq, 2))
                } else {
                    Ok(self.symbol(TokenKind::Gt, 1))
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    Ok(self.symbol(TokenKind::LtEq, 2))
                } else {
                    Ok(self.symbol(TokenKind::Lt, 1))
                }
            }
            Some('"') => self.read_string(),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                let start = self.here();
                let ident = self.read_identifier();
                let kind = TokenKind::keyword(&ident).unwrap_or(TokenKind::Name);
                Ok(Token::new(kind, ident, start))
            }
            Some(ch) if ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.') => self
                .read_pattern(&NUMBER, TokenKind::Number)
                .ok_or(LexError::UnexpectedChar {
                    ch,
                    position: self.here(),
                }),
            Some(ch) => Err(LexError::UnexpectedChar {
                ch,
                position: self.here(),
            }),
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("from to where and true false null");
    let kinds: Vec<TokenKind> = std::iter::from_fn(|| {
        let token = lexer.next_token().unwrap();
        (token.kind != TokenKind::Eof).then_some(token.kind)
    })
    .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::From,
            TokenKind::To,
            TokenKind::Where,
            TokenKind::And,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
        ]
    );
}

#[test]
fn test_file_mode_keeps_dots_together() {
    let mut lexer = Lexer::new("from data/in-1.json[users.*]");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::From);
    let file = lexer.next_file_token().unwrap();
    assert_eq!(file.kind, TokenKind::BarePath);
    assert_eq!(file.text, "data/in-1.json");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::LBracket);
    assert_eq!(lexer.next_token().unwrap().text, "users");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Dot);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Star);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::RBracket);
}
