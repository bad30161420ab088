use std::fmt;

use tracing::{debug, trace};

use crate::config::LexerConfig;
use crate::input::InputStream;
use crate::position::Position;
use crate::token::{Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that no reader recognises.
    UnexpectedSymbol(char),
    /// Quoted string hit a newline or the end of input before its closing quote.
    UnterminatedString,
    /// Template string hit the end of input before its closing backtick.
    UnterminatedTemplate,
    /// Bracketed region reached the end of input while still open.
    BracketsDoNotMatch { open: char },
    /// A character was requested past the end of input.
    UnexpectedEnd,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedSymbol(ch) => {
                write!(f, "unexpected symbol '{ch}' (code {})", u32::from(*ch))
            }
            Self::UnterminatedString => write!(f, "unterminated string literal"),
            Self::UnterminatedTemplate => write!(f, "unterminated template string"),
            Self::BracketsDoNotMatch { open } => {
                write!(f, "brackets do not match, '{open}' is never closed")
            }
            Self::UnexpectedEnd => write!(f, "unexpected end of input"),
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", position.line, position.col)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

/// A recogniser tried at the current input position. Returns `Ok(None)`
/// without consuming anything when it does not apply.
pub type Reader = fn(&mut InputStream<'_>, &LexerConfig) -> Result<Option<Token>, LexError>;

/// Readers in precedence order.
pub const READERS: &[Reader] = &[
    read_space,
    read_css_comment,
    read_comment,
    read_string,
    read_template_string,
    read_round_brackets,
    read_square_brackets,
    read_braces,
    read_comma,
    read_literal,
    read_symbol,
];

/// Tokenize a JSS source string with the default configuration.
///
/// # Errors
///
/// Returns `LexError` on unexpected characters, unterminated strings,
/// or unbalanced brackets.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(&LexerConfig::default()).tokenize(input)
}

/// Tokenize `input` whose first character sits at `origin`.
pub fn tokenize_with(
    input: &str,
    config: &LexerConfig,
    origin: Position,
) -> Result<Vec<Token>, LexError> {
    Lexer::new(config).tokenize_at(input, origin)
}

/// Applies [`READERS`] until the input is exhausted.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'c> {
    config: &'c LexerConfig,
}

impl<'c> Lexer<'c> {
    #[must_use]
    pub const fn new(config: &'c LexerConfig) -> Self {
        Self { config }
    }

    /// Tokenize a whole document, skipping a leading byte-order mark.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexError> {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        let tokens = self.tokenize_at(input, Position::START)?;
        debug!(tokens = tokens.len(), "lexed document");
        Ok(tokens)
    }

    pub fn tokenize_at(&self, input: &str, origin: Position) -> Result<Vec<Token>, LexError> {
        let mut stream = InputStream::with_position(input, origin);
        let mut tokens = Vec::new();

        'outer: while let Some(ch) = stream.peek() {
            for reader in READERS {
                if let Some(token) = reader(&mut stream, self.config)? {
                    trace!(kind = %token.kind, position = %token.position, "token");
                    tokens.push(token);
                    continue 'outer;
                }
            }
            return Err(LexError {
                kind: LexErrorKind::UnexpectedSymbol(ch),
                position: stream.position(),
            });
        }

        Ok(tokens)
    }
}

fn token_from(stream: &InputStream<'_>, kind: TokenKind, start: usize, position: Position) -> Token {
    Token::new(kind, stream.slice_from(start), position)
}

fn read_space(
    stream: &mut InputStream<'_>,
    _config: &LexerConfig,
) -> Result<Option<Token>, LexError> {
    let position = stream.position();
    let text = stream.read_while(|ch| u32::from(ch) <= 32);
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(Token::new(TokenKind::Space, text, position)))
}

/// `<!-- ... -->`. A bare `<` is left for the symbol reader.
fn read_css_comment(
    stream: &mut InputStream<'_>,
    _config: &LexerConfig,
) -> Result<Option<Token>, LexError> {
    if !stream.starts_with("<!--") {
        return Ok(None);
    }
    let position = stream.position();
    let text = stream.read_until("-->");
    Ok(Some(Token::new(TokenKind::CssComment, text, position)))
}

fn read_comment(
    stream: &mut InputStream<'_>,
    _config: &LexerConfig,
) -> Result<Option<Token>, LexError> {
    let position = stream.position();
    if stream.starts_with("//") {
        let text = stream.read_while(|ch| ch != '\n');
        return Ok(Some(Token::new(TokenKind::Comment, text, position)));
    }
    if stream.starts_with("/*") {
        // unterminated comments run to the end of input
        let text = stream.read_until("*/");
        return Ok(Some(Token::new(TokenKind::MultilineComment, text, position)));
    }
    Ok(None)
}

fn read_string(
    stream: &mut InputStream<'_>,
    _config: &LexerConfig,
) -> Result<Option<Token>, LexError> {
    let Some(quote @ ('\'' | '"')) = stream.peek() else {
        return Ok(None);
    };
    let position = stream.position();
    let start = stream.offset();
    stream.advance();

    loop {
        match stream.peek() {
            None | Some('\n') => {
                return Err(LexError {
                    kind: LexErrorKind::UnterminatedString,
                    position,
                });
            }
            Some('\\') => {
                stream.advance();
                stream.advance();
            }
            Some(ch) => {
                stream.advance();
                if ch == quote {
                    break;
                }
            }
        }
    }

    Ok(Some(token_from(stream, TokenKind::String, start, position)))
}

fn read_template_string(
    stream: &mut InputStream<'_>,
    _config: &LexerConfig,
) -> Result<Option<Token>, LexError> {
    if stream.peek() != Some('`') {
        return Ok(None);
    }
    let position = stream.position();
    let start = stream.offset();
    stream.advance();

    loop {
        match stream.advance() {
            None => {
                return Err(LexError {
                    kind: LexErrorKind::UnterminatedTemplate,
                    position,
                });
            }
            Some('\\') => {
                stream.advance();
            }
            Some('`') => break,
            Some(_) => {}
        }
    }

    Ok(Some(token_from(
        stream,
        TokenKind::TemplateString,
        start,
        position,
    )))
}

fn read_round_brackets(
    stream: &mut InputStream<'_>,
    _config: &LexerConfig,
) -> Result<Option<Token>, LexError> {
    read_balanced(stream, '(', ')', TokenKind::RoundBrackets)
}

fn read_square_brackets(
    stream: &mut InputStream<'_>,
    _config: &LexerConfig,
) -> Result<Option<Token>, LexError> {
    read_balanced(stream, '[', ']', TokenKind::SquareBrackets)
}

fn read_braces(
    stream: &mut InputStream<'_>,
    config: &LexerConfig,
) -> Result<Option<Token>, LexError> {
    let kind = if config.has_lazy_braces() {
        TokenKind::LazyBlock
    } else {
        TokenKind::Block
    };
    read_balanced(stream, '{', '}', kind)
}

fn read_balanced(
    stream: &mut InputStream<'_>,
    open: char,
    close: char,
    kind: TokenKind,
) -> Result<Option<Token>, LexError> {
    if stream.peek() != Some(open) {
        return Ok(None);
    }
    let position = stream.position();
    let start = stream.offset();
    skip_balanced(stream, open, close)?;
    Ok(Some(token_from(stream, kind, start, position)))
}

/// Consume a balanced `open ... close` span. Only brackets of the same
/// type are counted; strings, comments, and escaped characters inside the
/// span never change the depth.
fn skip_balanced(stream: &mut InputStream<'_>, open: char, close: char) -> Result<(), LexError> {
    let mut depth = 0usize;

    loop {
        let Some(ch) = stream.peek() else {
            return Err(LexError {
                kind: LexErrorKind::BracketsDoNotMatch { open },
                position: stream.position(),
            });
        };

        match ch {
            '\\' => {
                stream.advance();
                stream.advance();
            }
            '\'' | '"' | '`' => skip_quoted(stream, ch),
            '/' if stream.peek_at(1) == Some('/') => {
                stream.read_while(|c| c != '\n');
            }
            '/' if stream.peek_at(1) == Some('*') => {
                stream.read_until("*/");
            }
            _ => {
                stream.advance();
                if ch == open {
                    depth += 1;
                } else if ch == close {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Skip a quoted run inside a bracketed span. Running out of input is left
/// for the caller to report as unbalanced brackets.
fn skip_quoted(stream: &mut InputStream<'_>, quote: char) {
    stream.advance();
    while let Some(ch) = stream.advance() {
        if ch == '\\' {
            stream.advance();
        } else if ch == quote {
            break;
        }
    }
}

fn read_comma(
    stream: &mut InputStream<'_>,
    _config: &LexerConfig,
) -> Result<Option<Token>, LexError> {
    if stream.peek() != Some(',') {
        return Ok(None);
    }
    let position = stream.position();
    stream.advance();
    Ok(Some(Token::new(TokenKind::Comma, ",", position)))
}

/// Characters that make up a literal run.
#[must_use]
pub fn is_literal_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '$' || ch == '_' || (!ch.is_ascii() && ch.is_alphanumeric())
}

fn read_literal(
    stream: &mut InputStream<'_>,
    _config: &LexerConfig,
) -> Result<Option<Token>, LexError> {
    let position = stream.position();
    let text = stream.read_while(is_literal_char);
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(Token::new(TokenKind::Literal, text, position)))
}

fn read_symbol(
    stream: &mut InputStream<'_>,
    config: &LexerConfig,
) -> Result<Option<Token>, LexError> {
    match stream.peek() {
        Some(ch) if config.is_symbol(ch) => {}
        _ => return Ok(None),
    }
    let position = stream.position();
    let start = stream.offset();
    stream.advance();

    if config.joins_symbols() {
        while let Some(ch) = stream.peek() {
            let opens_comment = ch == '/' && matches!(stream.peek_at(1), Some('/' | '*'));
            if !config.is_symbol(ch) || opens_comment || stream.starts_with("<!--") {
                break;
            }
            stream.advance();
        }
    }

    Ok(Some(token_from(stream, TokenKind::Symbol, start, position)))
}

/// Break symbol runs produced with [`LexerConfig::join_symbols`] into one
/// token per character, each at its own position. Token values are kept,
/// so the source is unchanged. Grammar rules match symbols a character at
/// a time and always parse this form.
#[must_use]
pub fn split_symbol_runs(tokens: Vec<Token>) -> Vec<Token> {
    if !tokens.iter().any(is_symbol_run) {
        return tokens;
    }
    let mut split = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !is_symbol_run(&token) {
            split.push(token);
            continue;
        }
        let mut position = token.position;
        for ch in token.value.chars() {
            split.push(Token::new(TokenKind::Symbol, ch, position));
            position = position.advance(ch);
        }
    }
    split
}

fn is_symbol_run(token: &Token) -> bool {
    token.kind == TokenKind::Symbol && token.value.chars().nth(1).is_some()
}
