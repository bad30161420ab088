//! Rewindable, index-addressed view over a token slice.
//!
//! Backtracking works on copies: [`TokenStream::child`] starts a new view
//! at the current cursor, a parser advances the child, and the caller
//! commits with [`TokenStream::flush`] only when the parse succeeded.
//! A child that is dropped without flushing leaves the parent untouched.

use crate::config::LexerConfig;
use crate::error::ParseError;
use crate::position::{Position, SourceFragment};
use crate::token::Token;

#[derive(Debug, Clone)]
pub struct TokenStream<'t> {
    tokens: &'t [Token],
    config: &'t LexerConfig,
    origin: Position,
    start: usize,
    cursor: usize,
}

impl<'t> TokenStream<'t> {
    /// A stream over `tokens`; `origin` is the position of the first
    /// character the tokens were lexed from.
    #[must_use]
    pub const fn new(tokens: &'t [Token], config: &'t LexerConfig, origin: Position) -> Self {
        Self {
            tokens,
            config,
            origin,
            start: 0,
            cursor: 0,
        }
    }

    /// Configuration used to re-lex bracketed tokens.
    #[must_use]
    pub const fn config(&self) -> &'t LexerConfig {
        self.config
    }

    #[must_use]
    pub fn token_at(&self, index: usize) -> Option<&'t Token> {
        self.tokens.get(index)
    }

    /// The next token, trivia included, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.cursor)
    }

    /// The next non-trivia token and its index, without consuming anything.
    #[must_use]
    pub fn peek_significant(&self) -> Option<(usize, &'t Token)> {
        self.tokens
            .iter()
            .enumerate()
            .skip(self.cursor)
            .find(|(_, token)| !token.is_trivia())
    }

    #[must_use]
    pub fn eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// True when only trivia remains.
    #[must_use]
    pub fn at_significant_end(&self) -> bool {
        self.peek_significant().is_none()
    }

    #[must_use]
    pub const fn current_position(&self) -> usize {
        self.cursor
    }

    pub const fn move_position(&mut self, index: usize) {
        self.cursor = index;
    }

    /// Consume leading whitespace and comments. Returns whether any were
    /// skipped.
    pub fn skip_trivia(&mut self) -> bool {
        let before = self.cursor;
        while self.peek().is_some_and(Token::is_trivia) {
            self.cursor += 1;
        }
        self.cursor > before
    }

    /// A look-ahead view starting at the current cursor.
    #[must_use]
    pub const fn child(&self) -> Self {
        Self {
            tokens: self.tokens,
            config: self.config,
            origin: self.origin,
            start: self.cursor,
            cursor: self.cursor,
        }
    }

    /// Commit everything `child` consumed.
    pub const fn flush(&mut self, child: &Self) {
        self.cursor = child.cursor;
    }

    /// Exact source of everything consumed since this stream was created.
    #[must_use]
    pub fn source_fragment(&self) -> SourceFragment<'t> {
        SourceFragment::new(&self.tokens[self.start..self.cursor])
    }

    /// Source position of the next token, or of the end of input.
    #[must_use]
    pub fn next_position(&self) -> Position {
        self.peek().map_or_else(|| self.end_position(), |token| token.position)
    }

    /// Source position of the next non-trivia token, or of the end of input.
    #[must_use]
    pub fn significant_position(&self) -> Position {
        self.peek_significant()
            .map_or_else(|| self.end_position(), |(_, token)| token.position)
    }

    /// Position just past the last token.
    #[must_use]
    pub fn end_position(&self) -> Position {
        self.tokens.last().map_or(self.origin, |token| {
            token.position.advance_str(&token.value)
        })
    }

    /// "`expected` is expected" at the next significant token, or an
    /// unexpected-end error when nothing significant is left.
    #[must_use]
    pub fn expected(&self, expected: &str) -> ParseError {
        match self.peek_significant() {
            Some((_, token)) => ParseError::expected(expected, &token.value, token.position),
            None => ParseError::unexpected_end(expected, self.end_position()),
        }
    }

    /// "unexpected token" at the next significant token.
    #[must_use]
    pub fn unexpected(&self) -> ParseError {
        match self.peek_significant() {
            Some((_, token)) => ParseError::unexpected_token(&token.value, token.position),
            None => ParseError::unexpected_end("more input", self.end_position()),
        }
    }
}

impl<'t> Iterator for TokenStream<'t> {
    type Item = &'t Token;

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }
}
