//! Character cursor over source text with line/column tracking.

use crate::lexer::{LexError, LexErrorKind};
use crate::position::Position;

/// A forward-only cursor over a string.
#[derive(Debug, Clone)]
pub struct InputStream<'a> {
    text: &'a str,
    offset: usize,
    position: Position,
}

impl<'a> InputStream<'a> {
    /// Start a stream at the top of a document.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self::with_position(text, Position::START)
    }

    /// Start a stream whose first character sits at `origin`, used when
    /// re-lexing the interior of a bracketed token.
    #[must_use]
    pub const fn with_position(text: &'a str, origin: Position) -> Self {
        Self {
            text,
            offset: 0,
            position: origin,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Byte offset of the cursor into the text.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.offset >= self.text.len()
    }

    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character `n` positions after the cursor.
    #[must_use]
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Unconsumed remainder of the text.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    /// Text between a saved offset and the cursor.
    #[must_use]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.text[start..self.offset]
    }

    /// Consume and return the current character.
    pub fn next_char(&mut self) -> Result<char, LexError> {
        let ch = self.peek().ok_or(LexError {
            kind: LexErrorKind::UnexpectedEnd,
            position: self.position,
        })?;
        self.bump(ch);
        Ok(ch)
    }

    /// Consume the current character if there is one.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.bump(ch);
        Some(ch)
    }

    /// Consume characters while `pred` holds and return them.
    pub fn read_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.offset;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.bump(ch);
        }
        self.slice_from(start)
    }

    /// Consume through the first occurrence of `delimiter`, returning the
    /// consumed text including the delimiter. Without a match the rest of
    /// the input is consumed and returned.
    pub fn read_until(&mut self, delimiter: &str) -> &'a str {
        let start = self.offset;
        let end = self
            .rest()
            .find(delimiter)
            .map_or(self.text.len(), |found| self.offset + found + delimiter.len());
        let consumed = &self.text[start..end];
        self.position = self.position.advance_str(consumed);
        self.offset = end;
        consumed
    }

    fn bump(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        self.position = self.position.advance(ch);
    }
}
