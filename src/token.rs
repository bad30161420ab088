use std::fmt;

use serde::Serialize;

use crate::position::Position;

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Run of characters with code point <= 32.
    Space,
    /// Line comment (`// ...`), newline excluded.
    Comment,
    /// Block comment (`/* ... */`).
    MultilineComment,
    /// HTML-style comment (`<!-- ... -->`).
    CssComment,
    /// Run of `[0-9a-zA-Z$_]`.
    Literal,
    /// Single- or double-quoted string, quotes included.
    String,
    /// Backtick string, backticks included.
    TemplateString,
    /// Punctuation.
    Symbol,
    /// `,`.
    Comma,
    /// Balanced `(...)`.
    RoundBrackets,
    /// Balanced `[...]`.
    SquareBrackets,
    /// Balanced `{...}` whose interior is lexed on demand.
    LazyBlock,
    /// Balanced `{...}` produced when lazy braces are disabled.
    Block,
}

impl TokenKind {
    /// Whitespace and comments.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Space | Self::Comment | Self::MultilineComment | Self::CssComment
        )
    }

    /// Tokens that wrap a balanced bracketed region.
    #[must_use]
    pub const fn is_bracketed(self) -> bool {
        matches!(
            self,
            Self::RoundBrackets | Self::SquareBrackets | Self::LazyBlock | Self::Block
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Space => "space",
            Self::Comment => "comment",
            Self::MultilineComment => "multiline comment",
            Self::CssComment => "css comment",
            Self::Literal => "literal",
            Self::String => "string",
            Self::TemplateString => "template string",
            Self::Symbol => "symbol",
            Self::Comma => "comma",
            Self::RoundBrackets => "round brackets",
            Self::SquareBrackets => "square brackets",
            Self::LazyBlock | Self::Block => "block",
        };
        f.write_str(name)
    }
}

/// A single token with its kind, exact source text, and start position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }

    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    #[must_use]
    pub fn is_symbol(&self, text: &str) -> bool {
        self.kind == TokenKind::Symbol && self.value == text
    }

    #[must_use]
    pub fn is_literal(&self, text: &str) -> bool {
        self.kind == TokenKind::Literal && self.value == text
    }

    /// Interior text of a bracketed token with the position of its first
    /// interior character.
    #[must_use]
    pub fn interior(&self) -> Option<(&str, Position)> {
        if !self.kind.is_bracketed() {
            return None;
        }
        let mut chars = self.value.chars();
        let open = chars.next()?;
        chars.next_back()?;
        Some((chars.as_str(), self.position.advance(open)))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
