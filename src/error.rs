//! Structured parse errors.
//!
//! Errors are ordinary values: the combinators in [`crate::combinator`]
//! use them to drive backtracking, and their kind decides which failure
//! is reported when several alternatives fail.

use std::fmt;

use crate::lexer::LexError;
use crate::position::Position;

/// Classifies a parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The stream ran out while `expected` was still needed.
    UnexpectedEnd { expected: String },
    /// A leaf matcher saw the wrong token.
    Expected { expected: String, found: String },
    /// No rule applies to this token.
    UnexpectedToken { found: String },
    /// Step `index` (> 0) of a sequence failed after earlier steps matched.
    Sequence { index: usize, cause: Box<ParseError> },
    /// The content of a bracketed token failed to parse.
    Block { cause: Box<ParseError> },
    /// A list that needs at least one element found none.
    EmptyList { expected: String },
    /// Re-lexing the interior of a bracketed token failed.
    Lex(LexError),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEnd { expected } => {
                write!(f, "unexpected end of input, {expected} is expected")
            }
            Self::Expected { expected, found } => {
                write!(f, "{expected} is expected, found '{found}'")
            }
            Self::UnexpectedToken { found } => write!(f, "unexpected token '{found}'"),
            Self::Sequence { cause, .. } | Self::Block { cause } => write!(f, "{}", cause.kind),
            Self::EmptyList { expected } => write!(f, "at least one {expected} is expected"),
            Self::Lex(err) => write!(f, "{}", err.kind),
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", position.line, position.col)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
}

impl ParseError {
    pub fn unexpected_end(expected: impl Into<String>, position: Position) -> Self {
        Self {
            kind: ParseErrorKind::UnexpectedEnd {
                expected: expected.into(),
            },
            position,
        }
    }

    pub fn expected(
        expected: impl Into<String>,
        found: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            kind: ParseErrorKind::Expected {
                expected: expected.into(),
                found: found.into(),
            },
            position,
        }
    }

    pub fn unexpected_token(found: impl Into<String>, position: Position) -> Self {
        Self {
            kind: ParseErrorKind::UnexpectedToken {
                found: found.into(),
            },
            position,
        }
    }

    pub fn empty_list(expected: impl Into<String>, position: Position) -> Self {
        Self {
            kind: ParseErrorKind::EmptyList {
                expected: expected.into(),
            },
            position,
        }
    }

    /// Wrap a failure at step `index` of a sequence.
    #[must_use]
    pub fn sequence(cause: Self, index: usize) -> Self {
        let position = cause.position;
        Self {
            kind: ParseErrorKind::Sequence {
                index,
                cause: Box::new(cause),
            },
            position,
        }
    }

    /// Wrap a failure inside a bracketed token.
    #[must_use]
    pub fn block(cause: Self) -> Self {
        let position = cause.position;
        Self {
            kind: ParseErrorKind::Block {
                cause: Box::new(cause),
            },
            position,
        }
    }

    /// True when this error, or any error it wraps, came from inside a
    /// bracketed token. Such errors are never swallowed by backtracking.
    #[must_use]
    pub fn is_block(&self) -> bool {
        match &self.kind {
            ParseErrorKind::Block { .. } => true,
            ParseErrorKind::Sequence { cause, .. } => cause.is_block(),
            _ => false,
        }
    }

    /// True when a sequence failed after matching its first step.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Sequence { .. })
    }

    #[must_use]
    pub const fn is_unexpected_end(&self) -> bool {
        matches!(self.kind, ParseErrorKind::UnexpectedEnd { .. })
    }

    /// The wrapped error, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&Self> {
        match &self.kind {
            ParseErrorKind::Sequence { cause, .. } | ParseErrorKind::Block { cause } => Some(cause),
            _ => None,
        }
    }

    /// The innermost error of the chain.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        Self {
            position: err.position,
            kind: ParseErrorKind::Lex(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::LexErrorKind;

    fn leaf() -> ParseError {
        ParseError::expected("':'", "red", Position::new(2, 5))
    }

    #[test]
    fn wrapping_keeps_position() {
        let err = ParseError::sequence(ParseError::block(leaf()), 2);
        assert_eq!(err.position, Position::new(2, 5));
        assert!(err.is_partial());
        assert!(err.is_block());
        assert_eq!(err.root_cause(), &leaf());
    }

    #[test]
    fn display_uses_root_message() {
        let err = ParseError::sequence(leaf(), 1);
        assert_eq!(
            err.to_string(),
            "':' is expected, found 'red' at line 2, column 5"
        );
    }

    #[test]
    fn lex_errors_convert() {
        let err = ParseError::from(LexError {
            kind: LexErrorKind::UnterminatedString,
            position: Position::new(1, 3),
        });
        assert_eq!(err.position, Position::new(1, 3));
        assert!(!err.is_block());
        assert_eq!(
            err.to_string(),
            "unterminated string literal at line 1, column 3"
        );
    }
}
