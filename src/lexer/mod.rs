mod token;

pub use token::{Token, TokenKind};

use crate::error::LexError;
use log::{debug, trace};
use std::iter::Peekable;
use std::str::Chars;

/// Converts source text into tokens, always ending with `EndOfInput`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

/// Left-to-right scanner over the source characters.
///
/// Positions are counted in characters, not bytes, so they line up with what a
/// user sees when the error is rendered under the input.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            position: 0,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
                continue;
            }

            let start = self.position;
            let kind = if ch.is_ascii_digit() || ch == '.' {
                self.scan_number()?
            } else if let Some(kind) = TokenKind::from_symbol(ch) {
                self.advance();
                kind
            } else {
                return Err(LexError {
                    position: start,
                    character: ch,
                });
            };

            trace!("Token {} at {}", kind, start);
            tokens.push(Token::new(kind, start));
        }

        tokens.push(Token::new(TokenKind::EndOfInput, self.position));
        debug!("Tokenized {} tokens", tokens.len());
        Ok(tokens)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position += 1;
        Some(ch)
    }

    /// Consumes a maximal run of digits and decimal points and decodes it.
    fn scan_number(&mut self) -> Result<TokenKind, LexError> {
        let start = self.position;
        let mut literal = String::new();
        let mut second_point = None;

        while let Some(&ch) = self.chars.peek() {
            if !(ch.is_ascii_digit() || ch == '.') {
                break;
            }
            if ch == '.' && literal.contains('.') && second_point.is_none() {
                second_point = Some(self.position);
            }
            literal.push(ch);
            self.advance();
        }

        if let Some(position) = second_point {
            return Err(LexError {
                position,
                character: '.',
            });
        }

        literal
            .parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| LexError {
                position: start,
                character: '.',
            })
    }
}
