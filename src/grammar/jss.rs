//! JSS statements.
//!
//! JSS is CSS whose selectors and values may contain `${...}`
//! interpolations, whose blocks may hold variable declarations, spreads,
//! and nested rules, and whose top level may hold arbitrary script. Script
//! is not parsed; it is kept as [`Node::Raw`] statements.

use crate::ast::{Node, Spread, Text, VarDeclaration, VarKeyword};
use crate::combinator::{
    PResult, Parser, any_literal, block, capture, keyword, map, optional, probe,
    raw_value_with_position, sequence, symbol,
};
use crate::config::Dialect;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

use super::css::{at_rule, declaration, probe_at, probe_semicolon, rule_block};
use super::{BRACES, is_semicolon, items, statement_end, stray_semicolon, value_tokens};

/// Words that start a script statement.
pub const SCRIPT_KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "default", "delete",
    "do", "else", "export", "finally", "for", "function", "if", "import", "let", "new", "return",
    "switch", "throw", "try", "typeof", "var", "void", "while", "yield",
];

pub fn stylesheet(stream: &mut TokenStream<'_>) -> PResult<Vec<Node>> {
    items(crate::first_of![
        probe_semicolon(stray_semicolon),
        probe_at(|stream: &mut TokenStream<'_>| at_rule(stream, Dialect::Jss)),
        probe(var_declaration, is_var_start),
        probe(raw_statement, is_script_keyword),
        |stream: &mut TokenStream<'_>| rule_block(stream, Dialect::Jss),
        raw_statement,
    ])
    .parse(stream)
}

/// Items of a JSS rule block or variable block.
pub fn block_items(stream: &mut TokenStream<'_>) -> PResult<Vec<Node>> {
    items(crate::first_of![
        probe_semicolon(stray_semicolon),
        probe_at(|stream: &mut TokenStream<'_>| at_rule(stream, Dialect::Jss)),
        probe(var_declaration, is_var_start),
        probe(spread, is_spread_start),
        probe(raw_statement, is_script_keyword),
        |stream: &mut TokenStream<'_>| declaration(stream, Dialect::Jss),
        |stream: &mut TokenStream<'_>| rule_block(stream, Dialect::Jss),
    ])
    .parse(stream)
}

pub fn is_script_keyword(token: &Token) -> bool {
    token.kind == TokenKind::Literal && SCRIPT_KEYWORDS.contains(&token.value.as_str())
}

pub fn is_var_start(token: &Token) -> bool {
    token.kind == TokenKind::Literal
        && (token.value == "export" || VarKeyword::from_keyword(&token.value).is_some())
}

fn is_spread_start(token: &Token) -> bool {
    token.kind == TokenKind::Symbol && token.value.starts_with('.')
}

/// `export? const|let|var name = { items };?`
pub fn var_declaration(stream: &mut TokenStream<'_>) -> PResult<Node> {
    let var_keyword = crate::first_of![
        map(keyword("const"), |_: Token| VarKeyword::Const),
        map(keyword("let"), |_: Token| VarKeyword::Let),
        map(keyword("var"), |_: Token| VarKeyword::Var),
    ];
    let parser = capture(sequence((
        optional(keyword("export")),
        var_keyword,
        any_literal(),
        symbol("="),
        block(BRACES, block_items),
        optional(symbol(";")),
    )));
    let ((export, kind, name, _, items, _), raw) = parser.parse(stream)?;
    Ok(Node::JssVarDeclaration(VarDeclaration {
        keyword: kind,
        name: name.value,
        exported: export.is_some(),
        items,
        raw: raw.value,
        position: raw.position,
    }))
}

/// `...expression;`
pub fn spread(stream: &mut TokenStream<'_>) -> PResult<Node> {
    let expression = |stream: &mut TokenStream<'_>| {
        value_tokens(stream, "expression", |_| false, |_, _| true)
    };
    let parser = capture(sequence((
        symbol("..."),
        raw_value_with_position(expression),
        statement_end,
    )));
    let ((_, expression, ()), raw) = parser.parse(stream)?;
    Ok(Node::JssSpread(Spread {
        expression: expression.value,
        expression_position: expression.position,
        raw: raw.value,
        position: raw.position,
    }))
}

/// A script statement kept verbatim. It runs through the first `;`, the
/// first brace block (with a `;` right after it), or the last token
/// before a line break, whichever comes first.
pub fn raw_statement(stream: &mut TokenStream<'_>) -> PResult<Node> {
    let mut child = stream.child();
    child.skip_trivia();
    let position = child.next_position();
    let start = child.current_position();
    let mut end = start;

    while let Some(token) = child.peek() {
        if token.is_trivia() {
            if token.value.contains('\n') {
                break;
            }
            child.next();
            continue;
        }
        child.next();
        end = child.current_position();
        if is_semicolon(token) {
            break;
        }
        if BRACES.contains(&token.kind) {
            if child.peek().is_some_and(is_semicolon) {
                child.next();
                end = child.current_position();
            }
            break;
        }
    }

    if end == start {
        return Err(stream.expected("statement"));
    }
    child.move_position(end);
    let value = child.source_fragment().value(true);
    stream.flush(&child);
    Ok(Node::Raw(Text { value, position }))
}
