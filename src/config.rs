//! Lexer and grammar configuration.

/// Punctuation recognised by the symbol reader unless overridden.
pub const DEFAULT_SYMBOLS: &str = "!#%&*+-./:;<=>?@\\^|~";

/// Settings that shape how source text is split into tokens.
///
/// The same configuration is reused when the interior of a bracketed
/// token is lexed on demand, so nested regions follow the outer rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerConfig {
    symbols: String,
    join_symbols: bool,
    lazy_braces: bool,
}

impl LexerConfig {
    /// Default alphabet, one token per symbol character, lazy braces.
    #[must_use]
    pub fn new() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.to_string(),
            join_symbols: false,
            lazy_braces: true,
        }
    }

    /// Replace the symbol alphabet.
    #[must_use]
    pub fn symbols(mut self, alphabet: &str) -> Self {
        self.symbols = alphabet.to_string();
        self
    }

    /// Emit one symbol token per maximal run instead of per character.
    #[must_use]
    pub const fn join_symbols(mut self, join: bool) -> Self {
        self.join_symbols = join;
        self
    }

    /// Emit `{...}` as [`TokenKind::LazyBlock`](crate::TokenKind::LazyBlock)
    /// (the default) or as a plain [`TokenKind::Block`](crate::TokenKind::Block).
    #[must_use]
    pub const fn lazy_braces(mut self, lazy: bool) -> Self {
        self.lazy_braces = lazy;
        self
    }

    #[must_use]
    pub fn is_symbol(&self, ch: char) -> bool {
        self.symbols.contains(ch)
    }

    #[must_use]
    pub const fn joins_symbols(&self) -> bool {
        self.join_symbols
    }

    #[must_use]
    pub const fn has_lazy_braces(&self) -> bool {
        self.lazy_braces
    }
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Which grammar a source file is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Plain CSS: rule blocks, declarations, and at-rules only.
    Css,
    /// CSS plus interpolation, variables, spreads, and script statements.
    #[default]
    Jss,
}
