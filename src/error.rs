use crate::lexer::TokenKind;
use std::fmt;
use thiserror::Error;

/// A character the lexer cannot turn into a token.
///
/// `position` is the zero-based character index into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unexpected character '{character}' at position {position}")]
pub struct LexError {
    pub position: usize,
    pub character: char,
}

/// What the parser was looking for when it gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A number, `(` or unary `-`.
    Operand,
    ClosingParen,
    EndOfInput,
    /// Nesting or tree height past the configured limit.
    NestingAtMost(usize),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Operand => write!(f, "a number, '(' or '-'"),
            Expected::ClosingParen => write!(f, "')'"),
            Expected::EndOfInput => write!(f, "end of input"),
            Expected::NestingAtMost(limit) => {
                write!(f, "an expression nested no deeper than {}", limit)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("syntax error at position {position}: {}, expected {expected}", describe_found(.expected, .found))]
pub struct SyntaxError {
    pub position: usize,
    pub expected: Expected,
    pub found: TokenKind,
}

fn describe_found(expected: &Expected, found: &TokenKind) -> String {
    match (expected, found) {
        (_, TokenKind::EndOfInput) => "unexpected end of input".to_string(),
        (Expected::EndOfInput, found) => format!("unexpected trailing input {}", found),
        (_, found) => format!("unexpected {}", found),
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("division by zero")]
    DivisionByZero,
}

impl EvalError {
    /// Character position of the offending input, when the error has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            EvalError::Lex(err) => Some(err.position),
            EvalError::Syntax(err) => Some(err.position),
            EvalError::DivisionByZero => None,
        }
    }

    /// Line and column of the offending character within `source`.
    pub fn location(&self, source: &str) -> Option<Location> {
        self.position()
            .map(|position| Location::locate(source, position))
    }

    /// Renders the error under the source line with a caret at the offending character.
    ///
    /// Only the line holding the error is shown; multi-line sources also get
    /// the line and column appended.
    ///
    /// ```
    /// let source = "2+#3";
    /// let err = reckon_rs::evaluate(source).unwrap_err();
    /// assert_eq!(
    ///     err.render(source),
    ///     "2+#3\n  ^ unexpected character '#' at position 2"
    /// );
    /// ```
    pub fn render(&self, source: &str) -> String {
        let Some(location) = self.location(source) else {
            return format!("{}\n{}", source, self);
        };

        let line = source
            .split('\n')
            .nth(location.line - 1)
            .unwrap_or_default()
            .trim_end_matches('\r');
        // Keep tabs so the caret lines up however the terminal expands them.
        let indent: String = line
            .chars()
            .take(location.column - 1)
            .map(|ch| if ch == '\t' { '\t' } else { ' ' })
            .collect();

        if source.contains('\n') {
            format!("{}\n{}^ {} ({})", line, indent, self, location)
        } else {
            format!("{}\n{}^ {}", line, indent, self)
        }
    }
}

/// One-based line and column of a character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn locate(source: &str, position: usize) -> Self {
        let mut location = Location { line: 1, column: 1 };
        for ch in source.chars().take(position) {
            if ch == '\n' {
                location.line += 1;
                location.column = 1;
            } else {
                location.column += 1;
            }
        }
        location
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_message() {
        let err = LexError {
            position: 4,
            character: '$',
        };
        assert_eq!(err.to_string(), "unexpected character '$' at position 4");
    }

    #[test]
    fn test_syntax_error_messages() {
        let eof = SyntaxError {
            position: 4,
            expected: Expected::ClosingParen,
            found: TokenKind::EndOfInput,
        };
        assert_eq!(
            eof.to_string(),
            "syntax error at position 4: unexpected end of input, expected ')'"
        );

        let trailing = SyntaxError {
            position: 3,
            expected: Expected::EndOfInput,
            found: TokenKind::LeftParen,
        };
        assert_eq!(
            trailing.to_string(),
            "syntax error at position 3: unexpected trailing input '(', expected end of input"
        );
    }

    #[test]
    fn test_operand_message_mentions_unary_minus() {
        let err = SyntaxError {
            position: 2,
            expected: Expected::Operand,
            found: TokenKind::Multiply,
        };
        assert_eq!(
            err.to_string(),
            "syntax error at position 2: unexpected '*', expected a number, '(' or '-'"
        );
    }

    #[test]
    fn test_render_without_position() {
        let rendered = EvalError::DivisionByZero.render("1/0");
        assert_eq!(rendered, "1/0\ndivision by zero");
        assert_eq!(EvalError::DivisionByZero.position(), None);
    }

    #[test]
    fn test_render_multi_line_source() {
        let source = "1 +\n#";
        let err = EvalError::from(LexError {
            position: 4,
            character: '#',
        });
        assert_eq!(err.location(source), Some(Location { line: 2, column: 1 }));
        assert_eq!(
            err.render(source),
            "#\n^ unexpected character '#' at position 4 (line 2, column 1)"
        );
    }

    #[test]
    fn test_render_crlf_and_tabs() {
        let source = "1 +\r\n\t2 $";
        let err = EvalError::from(LexError {
            position: 8,
            character: '$',
        });
        assert_eq!(err.location(source), Some(Location { line: 2, column: 4 }));
        assert_eq!(
            err.render(source),
            "\t2 $\n\t  ^ unexpected character '$' at position 8 (line 2, column 4)"
        );
    }

    #[test]
    fn test_locate_end_of_input_after_newline() {
        assert_eq!(
            Location::locate("1 +\n", 4),
            Location { line: 2, column: 1 }
        );
        assert_eq!(Location::locate("", 0), Location { line: 1, column: 1 });
    }

    #[test]
    fn test_from_conversions() {
        let err: EvalError = LexError {
            position: 0,
            character: 'x',
        }
        .into();
        assert!(matches!(err, EvalError::Lex(_)));
        assert_eq!(err.position(), Some(0));
    }
}
