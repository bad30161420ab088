//! Parser combinators over [`TokenStream`].
//!
//! A parser is anything implementing [`Parser`]; plain functions and
//! closures taking `&mut TokenStream<'_>` qualify. Failure is an ordinary
//! [`ParseError`] value and backtracking is explicit: combinators run
//! alternatives on child streams and flush only the one that succeeded.
//!
//! Two error kinds steer backtracking. A [`ParseErrorKind::Sequence`]
//! error means a [`sequence`] matched its first step and then failed, so
//! [`first_of`] prefers it over alternatives that failed outright. A
//! [`ParseErrorKind::Block`] error means the content of an already
//! matched bracket token is malformed; it is never swallowed.
//!
//! [`ParseErrorKind::Sequence`]: crate::error::ParseErrorKind::Sequence
//! [`ParseErrorKind::Block`]: crate::error::ParseErrorKind::Block

use std::cmp::Reverse;

use serde::Serialize;
use tracing::trace;

use crate::config::LexerConfig;
use crate::error::ParseError;
use crate::lexer::{split_symbol_runs, tokenize_with};
use crate::position::Position;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

pub type PResult<T> = Result<T, ParseError>;

pub trait Parser<T> {
    fn parse(&self, stream: &mut TokenStream<'_>) -> PResult<T>;

    /// Cheap check against the next significant token. Alternatives whose
    /// probe fails are skipped by [`first_of`], [`longest_of`], and
    /// [`optional`] without running [`Parser::parse`], and leave no error
    /// behind.
    fn probe(&self, _next: Option<&Token>) -> bool {
        true
    }
}

impl<T, F> Parser<T> for F
where
    F: Fn(&mut TokenStream<'_>) -> PResult<T>,
{
    fn parse(&self, stream: &mut TokenStream<'_>) -> PResult<T> {
        self(stream)
    }
}

pub type BoxedParser<'p, T> = Box<dyn Parser<T> + 'p>;

pub fn boxed<'p, T, P: Parser<T> + 'p>(parser: P) -> BoxedParser<'p, T> {
    Box::new(parser)
}

/// A parser with a token pre-check attached.
#[derive(Debug, Clone, Copy)]
pub struct Probed<P, F> {
    parser: P,
    check: F,
}

impl<T, P, F> Parser<T> for Probed<P, F>
where
    P: Parser<T>,
    F: Fn(&Token) -> bool,
{
    fn parse(&self, stream: &mut TokenStream<'_>) -> PResult<T> {
        self.parser.parse(stream)
    }

    fn probe(&self, next: Option<&Token>) -> bool {
        next.is_some_and(|token| (self.check)(token))
    }
}

pub const fn probe<P, F: Fn(&Token) -> bool>(parser: P, check: F) -> Probed<P, F> {
    Probed { parser, check }
}

/// Run `parser` on a child stream and commit it on success.
pub fn attempt<T, P: Parser<T> + ?Sized>(parser: &P, stream: &mut TokenStream<'_>) -> PResult<T> {
    let mut child = stream.child();
    let value = parser.parse(&mut child)?;
    stream.flush(&child);
    Ok(value)
}

/// [`attempt`], turning ordinary failures into `None`. Block errors
/// still propagate.
pub fn try_parse<T, P: Parser<T> + ?Sized>(
    parser: &P,
    stream: &mut TokenStream<'_>,
) -> PResult<Option<T>> {
    let next = stream.peek_significant().map(|(_, token)| token);
    if !parser.probe(next) {
        return Ok(None);
    }
    match attempt(parser, stream) {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_block() => Err(err),
        Err(_) => Ok(None),
    }
}

pub fn map<T, U, P, F>(parser: P, f: F) -> impl Parser<U>
where
    P: Parser<T>,
    F: Fn(T) -> U,
{
    move |stream: &mut TokenStream<'_>| parser.parse(stream).map(&f)
}

// -----------------------------------------------------------
// Sequencing and alternation.
// -----------------------------------------------------------

/// A tuple of parsers run one after another.
pub trait Sequence<O> {
    fn parse_steps(&self, stream: &mut TokenStream<'_>) -> PResult<O>;
}

fn step<T, P: Parser<T>>(parser: &P, stream: &mut TokenStream<'_>, index: usize) -> PResult<T> {
    parser.parse(stream).map_err(|err| {
        if index == 0 {
            err
        } else {
            ParseError::sequence(err, index)
        }
    })
}

macro_rules! impl_sequence {
    ($($parser:ident $value:ident $index:tt),+) => {
        impl<$($value, $parser: Parser<$value>),+> Sequence<($($value,)+)> for ($($parser,)+) {
            fn parse_steps(&self, stream: &mut TokenStream<'_>) -> PResult<($($value,)+)> {
                Ok(($(step(&self.$index, stream, $index)?,)+))
            }
        }
    };
}

impl_sequence!(P0 T0 0, P1 T1 1);
impl_sequence!(P0 T0 0, P1 T1 1, P2 T2 2);
impl_sequence!(P0 T0 0, P1 T1 1, P2 T2 2, P3 T3 3);
impl_sequence!(P0 T0 0, P1 T1 1, P2 T2 2, P3 T3 3, P4 T4 4);
impl_sequence!(P0 T0 0, P1 T1 1, P2 T2 2, P3 T3 3, P4 T4 4, P5 T5 5);
impl_sequence!(P0 T0 0, P1 T1 1, P2 T2 2, P3 T3 3, P4 T4 4, P5 T5 5, P6 T6 6);

/// Run every step in order on a shared child stream. A failure at step
/// `i > 0` is wrapped as a sequence error carrying `i`.
pub fn sequence<O, S: Sequence<O>>(steps: S) -> impl Parser<O> {
    move |stream: &mut TokenStream<'_>| {
        let mut child = stream.child();
        let values = steps.parse_steps(&mut child)?;
        stream.flush(&child);
        Ok(values)
    }
}

/// The first alternative that succeeds.
///
/// When all fail the reported error is the first block error, else the
/// first partial-sequence error, else the first other error. A block
/// error stops the search immediately.
pub fn first_of<'p, T: 'p>(alternatives: Vec<BoxedParser<'p, T>>) -> impl Parser<T> + 'p {
    move |stream: &mut TokenStream<'_>| {
        let next = stream.peek_significant().map(|(_, token)| token);
        let mut failures = Failures::default();

        for alternative in &alternatives {
            if !alternative.probe(next) {
                continue;
            }
            let mut child = stream.child();
            match alternative.parse(&mut child) {
                Ok(value) => {
                    stream.flush(&child);
                    return Ok(value);
                }
                Err(err) if err.is_block() => return Err(err),
                Err(err) => failures.record(err),
            }
        }

        Err(failures.into_error(stream))
    }
}

/// The alternative that consumed the most tokens; ties go to the one
/// declared first.
pub fn longest_of<'p, T: 'p>(alternatives: Vec<BoxedParser<'p, T>>) -> impl Parser<T> + 'p {
    move |stream: &mut TokenStream<'_>| {
        let next = stream.peek_significant().map(|(_, token)| token);
        let mut failures = Failures::default();
        let mut best: Option<(T, TokenStream<'_>)> = None;

        for alternative in &alternatives {
            if !alternative.probe(next) {
                continue;
            }
            let mut child = stream.child();
            match alternative.parse(&mut child) {
                Ok(value) => {
                    let longer = best.as_ref().is_none_or(|(_, current)| {
                        child.current_position() > current.current_position()
                    });
                    if longer {
                        best = Some((value, child));
                    }
                }
                Err(err) if err.is_block() => return Err(err),
                Err(err) => failures.record(err),
            }
        }

        match best {
            Some((value, child)) => {
                stream.flush(&child);
                Ok(value)
            }
            None => Err(failures.into_error(stream)),
        }
    }
}

#[derive(Default)]
struct Failures {
    partial: Option<ParseError>,
    other: Option<ParseError>,
}

impl Failures {
    fn record(&mut self, err: ParseError) {
        let slot = if err.is_partial() {
            &mut self.partial
        } else {
            &mut self.other
        };
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    fn into_error(self, stream: &TokenStream<'_>) -> ParseError {
        self.partial
            .or(self.other)
            .unwrap_or_else(|| stream.unexpected())
    }
}

/// Box each parser and hand them to [`first_of`](crate::combinator::first_of).
#[macro_export]
macro_rules! first_of {
    ($($parser:expr),+ $(,)?) => {
        $crate::combinator::first_of(vec![$($crate::combinator::boxed($parser)),+])
    };
}

/// Box each parser and hand them to [`longest_of`](crate::combinator::longest_of).
#[macro_export]
macro_rules! longest_of {
    ($($parser:expr),+ $(,)?) => {
        $crate::combinator::longest_of(vec![$($crate::combinator::boxed($parser)),+])
    };
}

/// `None` on failure, except for block errors which propagate.
pub fn optional<T, P: Parser<T>>(parser: P) -> impl Parser<Option<T>> {
    move |stream: &mut TokenStream<'_>| try_parse(&parser, stream)
}

// -----------------------------------------------------------
// Repetition.
// -----------------------------------------------------------

/// Zero or more matches, stopping at the first failure or end of stream.
pub fn repeat<T, P: Parser<T>>(parser: P) -> impl Parser<Vec<T>> {
    move |stream: &mut TokenStream<'_>| {
        let mut items = Vec::new();
        while !stream.eof() {
            let before = stream.current_position();
            let Some(item) = try_parse(&parser, stream)? else {
                break;
            };
            items.push(item);
            if stream.current_position() == before {
                break;
            }
        }
        Ok(items)
    }
}

/// Matches until the stream is exhausted; any failure is returned.
pub fn strict_repeat<T, P: Parser<T>>(parser: P) -> impl Parser<Vec<T>> {
    move |stream: &mut TokenStream<'_>| {
        let mut items = Vec::new();
        while !stream.eof() {
            let before = stream.current_position();
            items.push(parser.parse(stream)?);
            if stream.current_position() == before {
                return Err(stream.unexpected());
            }
        }
        Ok(items)
    }
}

/// `element (separator element)*`. A separator is only consumed together
/// with the element after it. Zero elements is an error unless
/// `allow_empty`.
pub fn list<T, S, P, Q>(element: P, separator: Q, allow_empty: bool) -> impl Parser<Vec<T>>
where
    P: Parser<T>,
    Q: Parser<S>,
{
    move |stream: &mut TokenStream<'_>| {
        let mut items = Vec::new();
        match try_parse(&element, stream)? {
            Some(first) => items.push(first),
            None if allow_empty => return Ok(items),
            None => {
                return Err(ParseError::empty_list(
                    "list element",
                    stream.significant_position(),
                ));
            }
        }

        loop {
            let mut child = stream.child();
            if try_parse(&separator, &mut child)?.is_none() {
                break;
            }
            let Some(item) = try_parse(&element, &mut child)? else {
                break;
            };
            items.push(item);
            stream.flush(&child);
        }

        Ok(items)
    }
}

/// One or more `element`s separated by commas.
pub fn comma_list<T, P: Parser<T>>(element: P) -> impl Parser<Vec<T>> {
    list(element, comma(), false)
}

/// `left right*`, concatenating the text of every match.
pub fn left_recursive<L, R>(left: L, right: R) -> impl Parser<String>
where
    L: Parser<String>,
    R: Parser<String>,
{
    move |stream: &mut TokenStream<'_>| {
        let mut value = left.parse(stream)?;
        loop {
            let before = stream.current_position();
            let Some(more) = try_parse(&right, stream)? else {
                break;
            };
            value.push_str(&more);
            if stream.current_position() == before {
                break;
            }
        }
        Ok(value)
    }
}

// -----------------------------------------------------------
// Bracketed regions.
// -----------------------------------------------------------

/// Match a bracketed token of one of `kinds` and parse its interior with
/// `inner`. The interior must be consumed completely; every failure inside
/// is wrapped as a block error.
pub fn block<T, P: Parser<T>>(kinds: &'static [TokenKind], inner: P) -> impl Parser<T> {
    let open = bracketed(kinds);
    move |stream: &mut TokenStream<'_>| {
        let token = open.parse(stream)?;
        parse_interior(&token, stream.config(), &inner)
    }
}

/// Like [`block`] but parsing happens when [`Deferred::parse`] is called.
pub fn lazy_block<P: Clone>(kinds: &'static [TokenKind], inner: P) -> impl Parser<Deferred<P>> {
    let open = bracketed(kinds);
    move |stream: &mut TokenStream<'_>| {
        let token = open.parse(stream)?;
        Ok(Deferred {
            token,
            config: stream.config().clone(),
            parser: inner.clone(),
        })
    }
}

/// A matched bracketed token whose interior has not been parsed yet.
#[derive(Debug, Clone)]
pub struct Deferred<P> {
    token: Token,
    config: LexerConfig,
    parser: P,
}

impl<P> Deferred<P> {
    #[must_use]
    pub const fn token(&self) -> &Token {
        &self.token
    }

    pub fn parse<T>(&self) -> PResult<T>
    where
        P: Parser<T>,
    {
        parse_interior(&self.token, &self.config, &self.parser)
    }
}

/// Re-lex the interior of `token` at its true source position and parse it.
pub fn parse_interior<T, P: Parser<T> + ?Sized>(
    token: &Token,
    config: &LexerConfig,
    inner: &P,
) -> PResult<T> {
    let Some((text, origin)) = token.interior() else {
        return Err(ParseError::block(ParseError::expected(
            "block",
            &token.value,
            token.position,
        )));
    };
    trace!(position = %origin, kind = %token.kind, "parsing block interior");

    let tokens = tokenize_with(text, config, origin).map_err(|err| ParseError::block(err.into()))?;
    let tokens = split_symbol_runs(tokens);
    let mut stream = TokenStream::new(&tokens, config, origin);
    let value = inner.parse(&mut stream).map_err(ParseError::block)?;

    if let Some((_, rest)) = stream.peek_significant() {
        return Err(ParseError::block(ParseError::unexpected_token(
            &rest.value,
            rest.position,
        )));
    }
    Ok(value)
}

// -----------------------------------------------------------
// Source capture.
// -----------------------------------------------------------

/// Exact source text with the position of its first significant token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawValue {
    pub value: String,
    pub position: Position,
}

/// Run `parser` and return the source it consumed, leading trivia included.
pub fn raw_value<T, P: Parser<T>>(parser: P) -> impl Parser<String> {
    move |stream: &mut TokenStream<'_>| {
        let mut child = stream.child();
        parser.parse(&mut child)?;
        let value = child.source_fragment().value(false);
        stream.flush(&child);
        Ok(value)
    }
}

/// Run `parser` and return the source it consumed, leading trivia trimmed.
pub fn raw_value_with_position<T, P: Parser<T>>(parser: P) -> impl Parser<RawValue> {
    map(capture(parser), |(_, raw)| raw)
}

/// Run `parser` and return both its result and the trimmed source it
/// consumed.
pub fn capture<T, P: Parser<T>>(parser: P) -> impl Parser<(T, RawValue)> {
    move |stream: &mut TokenStream<'_>| {
        let mut child = stream.child();
        let value = parser.parse(&mut child)?;
        let fragment = child.source_fragment();
        let raw = RawValue {
            value: fragment.value(true),
            position: fragment
                .position()
                .unwrap_or_else(|| stream.significant_position()),
        };
        stream.flush(&child);
        Ok((value, raw))
    }
}

// -----------------------------------------------------------
// Token matchers.
// -----------------------------------------------------------

/// The next significant token, if it satisfies `pred`.
pub fn token_where<F>(expected: impl Into<String>, pred: F) -> impl Parser<Token> + Clone
where
    F: Fn(&Token) -> bool + Clone,
{
    let expected = expected.into();
    move |stream: &mut TokenStream<'_>| {
        let mut child = stream.child();
        child.skip_trivia();
        match child.next() {
            Some(token) if pred(token) => {
                stream.flush(&child);
                Ok(token.clone())
            }
            Some(token) => Err(ParseError::expected(
                expected.as_str(),
                &token.value,
                token.position,
            )),
            None => Err(ParseError::unexpected_end(
                expected.as_str(),
                stream.end_position(),
            )),
        }
    }
}

pub fn any_token(kind: TokenKind) -> impl Parser<Token> + Clone {
    token_where(kind.to_string(), move |token: &Token| token.kind == kind)
}

pub fn any_literal() -> impl Parser<Token> + Clone {
    any_token(TokenKind::Literal)
}

pub fn any_string() -> impl Parser<Token> + Clone {
    token_where("string", |token: &Token| {
        matches!(token.kind, TokenKind::String | TokenKind::TemplateString)
    })
}

pub fn any_block() -> impl Parser<Token> + Clone {
    token_where("brackets", |token: &Token| token.kind.is_bracketed())
}

pub fn round_brackets() -> impl Parser<Token> + Clone {
    any_token(TokenKind::RoundBrackets)
}

pub fn square_brackets() -> impl Parser<Token> + Clone {
    any_token(TokenKind::SquareBrackets)
}

pub fn comma() -> impl Parser<Token> + Clone {
    any_token(TokenKind::Comma)
}

fn bracketed(kinds: &'static [TokenKind]) -> impl Parser<Token> + Clone {
    let mut names: Vec<String> = Vec::new();
    for name in kinds.iter().map(ToString::to_string) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    let expected = names.join(" or ");
    token_where(expected, move |token: &Token| kinds.contains(&token.kind))
}

/// A literal token with exactly this text.
pub fn keyword(text: &'static str) -> impl Parser<Token> + Clone {
    token_where(format!("'{text}'"), move |token: &Token| {
        token.is_literal(text)
    })
}

/// A run of adjacent symbol tokens spelling exactly `text`.
pub fn symbol(text: &'static str) -> impl Parser<String> + Clone {
    move |stream: &mut TokenStream<'_>| {
        let mut child = stream.child();
        child.skip_trivia();
        let mut matched = String::new();
        while matched.len() < text.len() {
            match child.peek() {
                Some(token)
                    if token.kind == TokenKind::Symbol
                        && text[matched.len()..].starts_with(token.value.as_str()) =>
                {
                    matched.push_str(&token.value);
                    child.next();
                }
                _ => return Err(stream.expected(&format!("'{text}'"))),
            }
        }
        stream.flush(&child);
        Ok(matched)
    }
}

/// The longest of `candidates` spelled at the cursor.
pub fn one_of_symbols(candidates: &'static [&'static str]) -> impl Parser<String> + Clone {
    let mut ordered = candidates.to_vec();
    ordered.sort_by_key(|candidate| Reverse(candidate.len()));
    let expected = candidates
        .iter()
        .map(|candidate| format!("'{candidate}'"))
        .collect::<Vec<_>>()
        .join(" or ");

    move |stream: &mut TokenStream<'_>| {
        for candidate in &ordered {
            if let Ok(matched) = attempt(&symbol(*candidate), stream) {
                return Ok(matched);
            }
        }
        Err(stream.expected(&expected))
    }
}

/// Succeeds without consuming when the next token is not trivia.
pub fn no_spaces_here(stream: &mut TokenStream<'_>) -> PResult<()> {
    match stream.peek() {
        Some(token) if token.is_trivia() => Err(ParseError::expected(
            "no whitespace",
            &token.value,
            token.position,
        )),
        _ => Ok(()),
    }
}

/// Succeeds without consuming when the trivia before the next significant
/// token contains no line break.
pub fn no_line_terminator_here(stream: &mut TokenStream<'_>) -> PResult<()> {
    let mut lookahead = stream.child();
    while let Some(token) = lookahead.peek().filter(|token| token.is_trivia()) {
        if token.value.contains('\n') {
            return Err(ParseError::expected(
                "no line break",
                "line break",
                token.position,
            ));
        }
        lookahead.next();
    }
    Ok(())
}

/// One or more whitespace or comment tokens, returned verbatim.
pub fn trivia(stream: &mut TokenStream<'_>) -> PResult<RawValue> {
    let position = stream.next_position();
    let mut child = stream.child();
    if !child.skip_trivia() {
        return Err(stream.expected("whitespace"));
    }
    let value = child.source_fragment().value(false);
    stream.flush(&child);
    Ok(RawValue { value, position })
}

/// Succeeds when nothing but trivia remains.
pub fn end_of_input(stream: &mut TokenStream<'_>) -> PResult<()> {
    if stream.at_significant_end() {
        Ok(())
    } else {
        Err(stream.expected("end of input"))
    }
}
