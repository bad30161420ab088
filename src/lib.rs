//! Lexer, parser combinators, and grammar for CSS and JSS.
//!
//! JSS is CSS whose selectors and values may embed `${...}` script
//! expressions, whose blocks may hold variables, spreads, and nested
//! rules, and whose top level may interleave plain script statements.
//! Parsing produces a [`Stylesheet`] of [`Node`]s that keeps every byte of
//! the input, so untouched regions can be emitted verbatim.
//!
//! # Quick start
//!
//! ```
//! use jss_parser::{parse_jss, Node};
//!
//! let input = ".title { color: ${theme.color}; }\n";
//! let sheet = parse_jss(input).unwrap();
//! assert_eq!(sheet.to_source(), input);
//!
//! let Node::JssBlock(block) = &sheet.items[0] else { panic!() };
//! assert_eq!(block.selector_texts(), [".title"]);
//! let declaration = block.declarations().next().unwrap();
//! assert_eq!(declaration.value, "${theme.color}");
//! ```
//!
//! Plain CSS goes through [`parse_css`], which rejects interpolation and
//! script:
//!
//! ```
//! use jss_parser::parse_css;
//!
//! assert!(parse_css("a { color: red }").is_ok());
//! assert!(parse_css("a { color: ${red} }").is_err());
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod combinator;
pub mod config;
pub mod error;
pub mod grammar;
pub mod input;
pub mod lexer;
pub mod position;
pub mod printer;
pub mod report;
pub mod stream;
pub mod token;

use tracing::debug;

pub use ast::{Node, NodeType, Stylesheet};
pub use config::{Dialect, LexerConfig};
pub use error::{ParseError, ParseErrorKind};
pub use lexer::{LexError, LexErrorKind, Lexer, tokenize};
pub use position::Position;
pub use stream::TokenStream;
pub use token::{Token, TokenKind};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Source position of the failure.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Lex(err) => err.position,
            Self::Parse(err) => err.position,
        }
    }

    /// The message without its position suffix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Lex(err) => err.kind.to_string(),
            Self::Parse(err) => err.kind.to_string(),
        }
    }
}

/// Tokenize and parse a JSS source string.
pub fn parse_jss(input: &str) -> Result<Stylesheet, Error> {
    parse(input, Dialect::Jss)
}

/// Tokenize and parse a CSS source string.
pub fn parse_css(input: &str) -> Result<Stylesheet, Error> {
    parse(input, Dialect::Css)
}

/// Tokenize and parse `input` with the default lexer configuration.
pub fn parse(input: &str, dialect: Dialect) -> Result<Stylesheet, Error> {
    parse_with(input, &LexerConfig::default(), dialect)
}

/// Tokenize and parse `input` with a custom lexer configuration.
pub fn parse_with(input: &str, config: &LexerConfig, dialect: Dialect) -> Result<Stylesheet, Error> {
    let tokens = Lexer::new(config).tokenize(input)?;
    Ok(parse_tokens(&tokens, config, dialect)?)
}

/// Parse an already tokenized document. `config` is used to re-lex the
/// interior of bracketed tokens. Joined symbol runs are split before
/// parsing.
pub fn parse_tokens(
    tokens: &[Token],
    config: &LexerConfig,
    dialect: Dialect,
) -> Result<Stylesheet, ParseError> {
    let tokens = lexer::split_symbol_runs(tokens.to_vec());
    let mut stream = TokenStream::new(&tokens, config, Position::START);
    let items = grammar::stylesheet(&mut stream, dialect)?;
    debug!(?dialect, items = items.len(), "parsed stylesheet");
    Ok(Stylesheet { items })
}
