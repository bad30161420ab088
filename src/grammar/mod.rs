//! CSS and JSS grammars built from [`crate::combinator`].
//!
//! Every item list is parsed by [`items`]: whitespace and comments become
//! [`Node::Ignore`] entries and everything else goes through a
//! [`first_of!`] of statement kinds. Nodes keep their exact source, so
//! concatenating the items of a stylesheet reproduces the input.
//!
//! [`first_of!`]: crate::first_of

pub mod css;
pub mod jss;
pub mod media;
pub mod selector;

use crate::ast::{Node, Text};
use crate::combinator::{
    PResult, Parser, RawValue, end_of_input, map, raw_value_with_position, strict_repeat, symbol,
    trivia,
};
use crate::config::Dialect;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

/// Token kinds accepted where a `{ ... }` body is expected.
pub const BRACES: &[TokenKind] = &[TokenKind::LazyBlock, TokenKind::Block];

/// Top-level statements of a stylesheet in `dialect`.
pub fn stylesheet(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<Vec<Node>> {
    match dialect {
        Dialect::Css => css::stylesheet(stream),
        Dialect::Jss => jss::stylesheet(stream),
    }
}

/// Repeat until the end of the stream. A run of trivia is one
/// [`Node::Ignore`]; any other position must start a `statement`.
pub fn items<P: Parser<Node>>(statement: P) -> impl Parser<Vec<Node>> {
    strict_repeat(move |stream: &mut TokenStream<'_>| {
        if stream.peek().is_some_and(Token::is_trivia) {
            return ignore(stream);
        }
        statement.parse(stream)
    })
}

/// Whitespace and comments, kept verbatim.
pub fn ignore(stream: &mut TokenStream<'_>) -> PResult<Node> {
    let raw = trivia(stream)?;
    Ok(Node::Ignore(Text {
        value: raw.value,
        position: raw.position,
    }))
}

/// A `;` with nothing before it.
pub fn stray_semicolon(stream: &mut TokenStream<'_>) -> PResult<Node> {
    let raw = raw_value_with_position(symbol(";")).parse(stream)?;
    Ok(Node::Ignore(Text {
        value: raw.value,
        position: raw.position,
    }))
}

pub fn is_semicolon(token: &Token) -> bool {
    token.is_symbol(";")
}

/// `;`, or the end of the enclosing block.
pub fn statement_end(stream: &mut TokenStream<'_>) -> PResult<()> {
    crate::first_of![map(symbol(";"), |_: String| ()), end_of_input].parse(stream)
}

/// An identifier made of adjacent literal and `-` tokens, so `font-weight`
/// and `-webkit-box` are single names. Literals containing `$` are
/// rejected, except that JSS accepts `${...}` interpolations spliced into
/// the name.
pub fn identifier(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<RawValue> {
    let mut child = stream.child();
    child.skip_trivia();
    let position = child.next_position();
    let mut value = String::new();
    let mut named = false;

    while let Some(token) = child.peek() {
        match token.kind {
            TokenKind::Literal if !token.value.contains('$') => named = true,
            TokenKind::Literal if dialect == Dialect::Jss && interpolation_at(&child) => {
                value.push_str(&token.value);
                child.next();
                if let Some(block) = child.next() {
                    value.push_str(&block.value);
                }
                named = true;
                continue;
            }
            TokenKind::Symbol if token.value.chars().all(|ch| ch == '-') => {}
            _ => break,
        }
        value.push_str(&token.value);
        child.next();
    }

    if !named {
        return Err(stream.expected("identifier"));
    }
    stream.flush(&child);
    Ok(RawValue { value, position })
}

pub fn css_ident(stream: &mut TokenStream<'_>) -> PResult<RawValue> {
    identifier(stream, Dialect::Css)
}

pub fn jss_ident(stream: &mut TokenStream<'_>) -> PResult<RawValue> {
    identifier(stream, Dialect::Jss)
}

/// True when the cursor sits on a `${...}` interpolation: a literal whose
/// only `$` is its last character, directly followed by a brace block.
#[must_use]
pub fn interpolation_at(stream: &TokenStream<'_>) -> bool {
    let index = stream.current_position();
    let (Some(literal), Some(block)) = (stream.token_at(index), stream.token_at(index + 1)) else {
        return false;
    };
    literal.kind == TokenKind::Literal
        && literal
            .value
            .strip_suffix('$')
            .is_some_and(|head| !head.contains('$'))
        && BRACES.contains(&block.kind)
}

/// Consume tokens up to a `;` or a token matching `stop`, leaving
/// trailing trivia unconsumed. `accept` sees each token with the one
/// before it and may reject it. At least one significant token is
/// required.
pub(crate) fn value_tokens<S, A>(
    stream: &mut TokenStream<'_>,
    expected: &str,
    stop: S,
    accept: A,
) -> PResult<()>
where
    S: Fn(&Token) -> bool,
    A: Fn(&Token, Option<&Token>) -> bool,
{
    let mut end = None;
    let mut previous = None;
    while let Some(token) = stream.peek() {
        if is_semicolon(token) || stop(token) {
            break;
        }
        if !accept(token, previous) {
            return Err(stream.expected("';'"));
        }
        stream.next();
        if !token.is_trivia() {
            end = Some(stream.current_position());
        }
        previous = Some(token);
    }

    let Some(end) = end else {
        return Err(stream.expected(expected));
    };
    stream.move_position(end);
    Ok(())
}
