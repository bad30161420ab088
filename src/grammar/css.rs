//! CSS statements: at-rules, rule blocks, and declarations.
//!
//! These rules take the [`Dialect`] they run under; JSS reuses them with
//! interpolation-aware identifiers and its own block items.

use tracing::trace;

use crate::ast::{Block, Charset, Declaration, Import, Media, Node, Page};
use crate::combinator::{
    PResult, Parser, RawValue, any_string, block, capture, keyword, map, no_spaces_here, optional,
    probe, raw_value_with_position, round_brackets, sequence, symbol,
};
use crate::config::Dialect;
use crate::error::ParseError;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

use super::{
    BRACES, css_ident, identifier, is_semicolon, items, jss, media, selector, statement_end,
    stray_semicolon, value_tokens,
};

/// Top-level CSS: at-rules and rule blocks.
pub fn stylesheet(stream: &mut TokenStream<'_>) -> PResult<Vec<Node>> {
    items(crate::first_of![
        probe_semicolon(stray_semicolon),
        probe_at(|stream: &mut TokenStream<'_>| at_rule(stream, Dialect::Css)),
        |stream: &mut TokenStream<'_>| rule_block(stream, Dialect::Css),
    ])
    .parse(stream)
}

/// Items of a CSS rule block.
pub fn block_items(stream: &mut TokenStream<'_>) -> PResult<Vec<Node>> {
    declaration_items(stream, Dialect::Css)
}

/// Whitespace, stray semicolons, and declarations.
pub fn declaration_items(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<Vec<Node>> {
    items(crate::first_of![
        probe_semicolon(stray_semicolon),
        move |stream: &mut TokenStream<'_>| declaration(stream, dialect),
    ])
    .parse(stream)
}

pub fn is_at(token: &Token) -> bool {
    token.is_symbol("@")
}

pub(crate) fn probe_at<T, P: Parser<T>>(parser: P) -> impl Parser<T> {
    probe(parser, is_at)
}

pub(crate) fn probe_semicolon<T, P: Parser<T>>(parser: P) -> impl Parser<T> {
    probe(parser, is_semicolon)
}

/// `selectors { items }`, with items parsed by the dialect's block rules.
pub fn rule_block(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<Node> {
    let parser = capture(sequence((
        move |stream: &mut TokenStream<'_>| selector::selector_list(stream, dialect),
        block(BRACES, move |stream: &mut TokenStream<'_>| match dialect {
            Dialect::Css => block_items(stream),
            Dialect::Jss => jss::block_items(stream),
        }),
    )));
    let ((selectors, items), raw) = parser.parse(stream)?;
    let block = Block {
        selectors,
        items,
        raw: raw.value,
        position: raw.position,
    };
    Ok(match dialect {
        Dialect::Css => Node::CssBlock(block),
        Dialect::Jss => Node::JssBlock(block),
    })
}

/// `property: value !important;`. The value is kept as written; the
/// semicolon may be left out before the end of the block.
pub fn declaration(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<Node> {
    let parser = capture(sequence((
        move |stream: &mut TokenStream<'_>| identifier(stream, dialect),
        symbol(":"),
        raw_value_with_position(move |stream: &mut TokenStream<'_>| {
            declaration_value(stream, dialect)
        }),
        optional(sequence((symbol("!"), keyword("important")))),
        statement_end,
    )));
    let ((property, _, value, important, ()), raw) = parser.parse(stream)?;
    let declaration = Declaration {
        property: property.value,
        property_position: property.position,
        value: value.value,
        value_position: value.position,
        important: important.is_some(),
        raw: raw.value,
    };
    Ok(match dialect {
        Dialect::Css => Node::CssDeclaration(declaration),
        Dialect::Jss => Node::JssDeclaration(declaration),
    })
}

/// Any tokens up to `;` or `!`. A brace block is only allowed as a JSS
/// `${...}` interpolation.
fn declaration_value(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<()> {
    value_tokens(
        stream,
        "value",
        |token| token.is_symbol("!"),
        |token, previous| {
            if !BRACES.contains(&token.kind) {
                return true;
            }
            dialect == Dialect::Jss
                && previous.is_some_and(|previous| {
                    previous.kind == TokenKind::Literal && previous.value.ends_with('$')
                })
        },
    )
}

/// Dispatch on the name written directly after `@`.
pub fn at_rule(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<Node> {
    let mut lookahead = stream.child();
    lookahead.skip_trivia();
    match lookahead.next() {
        Some(token) if is_at(token) => {}
        _ => return Err(stream.expected("'@'")),
    }

    let Some(name) = lookahead.peek() else {
        return Err(lookahead.expected("at-rule name"));
    };
    trace!(name = %name.value, position = %name.position, "at-rule");
    match (name.kind, name.value.as_str()) {
        (TokenKind::Literal, "charset") => charset(stream),
        (TokenKind::Literal, "import") => import(stream),
        (TokenKind::Literal, "media") => media_rule(stream, dialect),
        (TokenKind::Literal, "page") => page(stream, dialect),
        _ => Err(ParseError::expected(
            "'charset', 'import', 'media' or 'page'",
            &name.value,
            name.position,
        )),
    }
}

/// `@charset "utf-8";`
fn charset(stream: &mut TokenStream<'_>) -> PResult<Node> {
    let parser = capture(sequence((
        symbol("@"),
        keyword("charset"),
        any_string(),
        statement_end,
    )));
    let ((_, _, charset, ()), raw) = parser.parse(stream)?;
    Ok(Node::CssCharset(Charset {
        charset: charset.value,
        raw: raw.value,
        position: raw.position,
    }))
}

/// `@import 'file.css' screen;` or `@import url(file.css);`
fn import(stream: &mut TokenStream<'_>) -> PResult<Node> {
    let path = crate::first_of![
        map(any_string(), |token: Token| token.value),
        map(
            raw_value_with_position(sequence((keyword("url"), no_spaces_here, round_brackets()))),
            |raw: RawValue| raw.value,
        ),
    ];
    let parser = capture(sequence((
        symbol("@"),
        keyword("import"),
        path,
        optional(media::media_query_list),
        statement_end,
    )));
    let ((_, _, path, media, ()), raw) = parser.parse(stream)?;
    Ok(Node::CssImport(Import {
        path,
        media: media.map(|media| media.value),
        raw: raw.value,
        position: raw.position,
    }))
}

/// `@media <queries> { ... }`. The body holds rule blocks and at-rules.
fn media_rule(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<Node> {
    let parser = capture(sequence((
        symbol("@"),
        keyword("media"),
        media::media_query_list,
        block(BRACES, move |stream: &mut TokenStream<'_>| {
            media_items(stream, dialect)
        }),
    )));
    let ((_, _, media, items), raw) = parser.parse(stream)?;
    Ok(Node::CssMedia(Media {
        media: media.value,
        media_position: media.position,
        items,
        raw: raw.value,
        position: raw.position,
    }))
}

fn media_items(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<Vec<Node>> {
    items(crate::first_of![
        probe_semicolon(stray_semicolon),
        probe_at(move |stream: &mut TokenStream<'_>| at_rule(stream, dialect)),
        move |stream: &mut TokenStream<'_>| rule_block(stream, dialect),
    ])
    .parse(stream)
}

/// `@page :first { ... }`
fn page(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<Node> {
    let pseudo = raw_value_with_position(sequence((symbol(":"), no_spaces_here, css_ident)));
    let parser = capture(sequence((
        symbol("@"),
        keyword("page"),
        optional(pseudo),
        block(BRACES, move |stream: &mut TokenStream<'_>| {
            declaration_items(stream, dialect)
        }),
    )));
    let ((_, _, pseudo, items), raw) = parser.parse(stream)?;
    Ok(Node::CssPage(Page {
        pseudo: pseudo.map(|pseudo| pseudo.value),
        items,
        raw: raw.value,
        position: raw.position,
    }))
}
