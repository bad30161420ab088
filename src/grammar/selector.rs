//! Selector lists.
//!
//! A complex selector is a chain of compound selectors joined by `>`,
//! `+`, `~` or whitespace. A compound selector is an optional element
//! name followed by id, class, attribute, and pseudo selectors, each
//! written directly against the previous one.

use crate::ast::{Node, Selector};
use crate::combinator::{
    PResult, Parser, capture, comma_list, no_spaces_here, one_of_symbols, optional, raw_value,
    round_brackets, sequence, square_brackets, symbol, try_parse,
};
use crate::config::Dialect;
use crate::stream::TokenStream;

use super::identifier;

const COMBINATORS: &[&str] = &[">", "+", "~"];

/// One or more comma-separated selectors.
pub fn selector_list(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<Vec<Node>> {
    comma_list(move |stream: &mut TokenStream<'_>| selector(stream, dialect)).parse(stream)
}

pub fn selector(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<Node> {
    let parser = capture(move |stream: &mut TokenStream<'_>| complex_selector(stream, dialect));
    let (fragments, raw) = parser.parse(stream)?;
    let selector = Selector {
        fragments,
        raw: raw.value,
        position: raw.position,
    };
    Ok(match dialect {
        Dialect::Css => Node::CssSelector(selector),
        Dialect::Jss => Node::JssSelector(selector),
    })
}

fn complex_selector(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<Vec<String>> {
    let combinator = one_of_symbols(COMBINATORS);
    let compound = move |stream: &mut TokenStream<'_>| compound_selector(stream, dialect);
    let mut fragments = Vec::new();

    // `> .child` inside a nested JSS block
    if dialect == Dialect::Jss {
        if let Some(leading) = try_parse(&combinator, stream)? {
            fragments.push(leading);
        }
    }
    fragments.extend(compound.parse(stream)?);

    loop {
        let mut child = stream.child();
        let joint = match try_parse(&combinator, &mut child)? {
            Some(symbol) => symbol,
            None if child.skip_trivia() => " ".to_string(),
            None => break,
        };
        let Some(next) = try_parse(&compound, &mut child)? else {
            break;
        };
        fragments.push(joint);
        fragments.extend(next);
        stream.flush(&child);
    }

    Ok(fragments)
}

fn compound_selector(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<Vec<String>> {
    let mut child = stream.child();
    child.skip_trivia();
    let mut fragments = Vec::new();

    let element = move |stream: &mut TokenStream<'_>| element_name(stream, dialect);
    if let Some(name) = try_parse(&element, &mut child)? {
        fragments.push(name);
    }

    let subclass = move |stream: &mut TokenStream<'_>| subclass_selector(stream, dialect);
    while no_spaces_here(&mut child).is_ok() {
        let Some(fragment) = try_parse(&subclass, &mut child)? else {
            break;
        };
        fragments.push(fragment);
    }

    if fragments.is_empty() {
        return Err(stream.expected("selector"));
    }
    stream.flush(&child);
    Ok(fragments)
}

fn element_name(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<String> {
    let name = move |stream: &mut TokenStream<'_>| identifier(stream, dialect).map(|raw| raw.value);
    match dialect {
        Dialect::Css => crate::first_of![name, symbol("*")].parse(stream),
        Dialect::Jss => crate::first_of![name, symbol("*"), symbol("&")].parse(stream),
    }
}

fn subclass_selector(stream: &mut TokenStream<'_>, dialect: Dialect) -> PResult<String> {
    let name = move |stream: &mut TokenStream<'_>| identifier(stream, dialect);
    crate::first_of![
        raw_value(sequence((symbol("#"), no_spaces_here, name))),
        raw_value(sequence((symbol("."), no_spaces_here, name))),
        raw_value(square_brackets()),
        raw_value(sequence((
            one_of_symbols(&[":", "::"]),
            no_spaces_here,
            name,
            optional(sequence((no_spaces_here, round_brackets()))),
        ))),
    ]
    .parse(stream)
}
