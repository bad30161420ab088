//! Source positions and verbatim source fragments.

use std::fmt;

use serde::Serialize;

use crate::token::Token;

/// A 1-indexed line/column location in the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// The first character of a document.
    pub const START: Self = Self { line: 1, col: 1 };

    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Position after consuming `ch`.
    #[must_use]
    pub const fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self {
                line: self.line + 1,
                col: 1,
            }
        } else {
            Self {
                line: self.line,
                col: self.col + 1,
            }
        }
    }

    /// Position after consuming every character of `text`.
    #[must_use]
    pub fn advance_str(self, text: &str) -> Self {
        text.chars().fold(self, Self::advance)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A contiguous run of tokens viewed as the source text they came from.
#[derive(Debug, Clone, Copy)]
pub struct SourceFragment<'t> {
    tokens: &'t [Token],
}

impl<'t> SourceFragment<'t> {
    #[must_use]
    pub const fn new(tokens: &'t [Token]) -> Self {
        Self { tokens }
    }

    #[must_use]
    pub const fn tokens(&self) -> &'t [Token] {
        self.tokens
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Position of the first non-trivia token, falling back to the first
    /// token when the fragment is all whitespace and comments.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.tokens
            .iter()
            .find(|token| !token.is_trivia())
            .or_else(|| self.tokens.first())
            .map(|token| token.position)
    }

    /// Concatenated token text. With `trim_start`, leading whitespace and
    /// comment tokens are dropped.
    #[must_use]
    pub fn value(&self, trim_start: bool) -> String {
        let skip = if trim_start {
            self.tokens
                .iter()
                .take_while(|token| token.is_trivia())
                .count()
        } else {
            0
        };
        self.tokens[skip..]
            .iter()
            .map(|token| token.value.as_str())
            .collect()
    }
}
