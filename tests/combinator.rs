//! Combinator behaviour observed through public parsers.

mod common;

use common::run;
use jss_parser::combinator::{
    PResult, Parser, any_literal, any_token, block, comma_list, keyword, lazy_block, list, map,
    one_of_symbols, optional, probe, raw_value, raw_value_with_position, repeat, sequence,
    strict_repeat, symbol, trivia,
};
use jss_parser::{ParseErrorKind, Position, Token, TokenKind, TokenStream, first_of, longest_of};
use pretty_assertions::assert_eq;

fn values(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.value.as_str()).collect()
}

fn names(stream: &mut TokenStream<'_>) -> PResult<Vec<Token>> {
    comma_list(any_literal()).parse(stream)
}

#[test]
fn trivia_is_kept_verbatim() {
    let (result, consumed) = run("  /* c */\n a", trivia);
    let raw = result.expect("trivia");
    assert_eq!(raw.value, "  /* c */\n ");
    assert_eq!(raw.position, Position::START);
    assert_eq!(consumed, 3);

    let (result, consumed) = run("a", trivia);
    assert!(result.is_err());
    assert_eq!(consumed, 0);
}

#[test]
fn brace_kinds_are_named_once() {
    let braces = block(&[TokenKind::LazyBlock, TokenKind::Block], keyword("a"));
    let (result, _) = run("x", braces);
    assert_eq!(
        result.expect_err("not a block").kind,
        ParseErrorKind::Expected {
            expected: "block".into(),
            found: "x".into(),
        }
    );
}

// -----------------------------------------------------------
// Alternation.
// -----------------------------------------------------------

#[test]
fn first_of_prefers_partial_sequence_error() {
    let parser = first_of![
        keyword("x"),
        map(sequence((keyword("a"), keyword("b"))), |(a, _): (Token, Token)| a),
    ];
    let (result, consumed) = run("a c", parser);
    let err = result.expect_err("no alternative matches");
    assert!(err.is_partial());
    assert_eq!(err.position, Position::new(1, 3));
    assert_eq!(consumed, 0);
}

#[test]
fn first_of_reports_first_plain_error() {
    let parser = first_of![keyword("x"), keyword("y")];
    let (result, _) = run("z", parser);
    let err = result.expect_err("no alternative matches");
    assert_eq!(
        err.kind,
        ParseErrorKind::Expected {
            expected: "'x'".into(),
            found: "z".into(),
        }
    );
}

#[test]
fn first_of_stops_at_block_error() {
    let parser = first_of![
        block(&[TokenKind::RoundBrackets], keyword("a")),
        any_token(TokenKind::RoundBrackets),
    ];
    let (result, _) = run("(b)", parser);
    let err = result.expect_err("block content is malformed");
    assert!(err.is_block());
    assert_eq!(err.position, Position::new(1, 2));
}

#[test]
fn first_of_takes_first_success_not_longest() {
    let parser = first_of![
        raw_value(keyword("a")),
        raw_value(sequence((keyword("a"), keyword("b")))),
    ];
    let (result, consumed) = run("a b", parser);
    assert_eq!(result, Ok("a".to_string()));
    assert_eq!(consumed, 1);
}

#[test]
fn probe_skips_alternative_without_error() {
    let parser = first_of![
        probe(keyword("x"), |token: &Token| token.is_literal("x")),
        keyword("y"),
    ];
    let (result, _) = run("  z", parser);
    assert_eq!(
        result.expect_err("no alternative matches").kind,
        ParseErrorKind::Expected {
            expected: "'y'".into(),
            found: "z".into(),
        }
    );
}

#[test]
fn probe_looks_past_whitespace() {
    let parser = first_of![probe(
        map(keyword("x"), |token: Token| token.value),
        |token: &Token| token.is_literal("x"),
    )];
    let (result, consumed) = run("  x", parser);
    assert_eq!(result, Ok("x".to_string()));
    assert_eq!(consumed, 2);
}

#[test]
fn longest_of_takes_furthest() {
    let parser = longest_of![
        raw_value(keyword("a")),
        raw_value(sequence((keyword("a"), keyword("b")))),
    ];
    let (result, consumed) = run("a b", parser);
    assert_eq!(result, Ok("a b".to_string()));
    assert_eq!(consumed, 3);
}

#[test]
fn longest_of_tie_goes_to_first() {
    let parser = longest_of![
        map(keyword("a"), |_: Token| "first"),
        map(keyword("a"), |_: Token| "second"),
    ];
    let (result, _) = run("a", parser);
    assert_eq!(result, Ok("first"));
}

#[test]
fn optional_swallows_plain_failure() {
    let (result, consumed) = run("b", optional(keyword("a")));
    assert_eq!(result, Ok(None));
    assert_eq!(consumed, 0);
}

#[test]
fn optional_keeps_block_errors() {
    let parser = optional(block(&[TokenKind::RoundBrackets], keyword("a")));
    let (result, _) = run("(b)", parser);
    assert!(result.expect_err("block error").is_block());
}

// -----------------------------------------------------------
// Symbols.
// -----------------------------------------------------------

#[test]
fn one_of_symbols_picks_longest() {
    let (result, consumed) = run("**x", one_of_symbols(&["*", "**"]));
    assert_eq!(result, Ok("**".to_string()));
    assert_eq!(consumed, 2);
}

#[test]
fn one_of_symbols_reports_all_candidates() {
    let (result, _) = run("x", one_of_symbols(&[">", "+"]));
    let err = result.expect_err("no symbol");
    assert_eq!(
        err.kind,
        ParseErrorKind::Expected {
            expected: "'>' or '+'".into(),
            found: "x".into(),
        }
    );
}

#[test]
fn symbol_skips_leading_trivia() {
    let (result, consumed) = run(" /* c */ ;", symbol(";"));
    assert_eq!(result, Ok(";".to_string()));
    assert_eq!(consumed, 4);
}

// -----------------------------------------------------------
// Repetition and lists.
// -----------------------------------------------------------

#[test]
fn comma_list_collects_elements() {
    let (result, consumed) = run("a, b ,c d", comma_list(any_literal()));
    let tokens = result.expect("list");
    assert_eq!(values(&tokens), vec!["a", "b", "c"]);
    assert_eq!(consumed, 7);
}

#[test]
fn trailing_separator_is_left_unconsumed() {
    let (result, consumed) = run("a, ;", comma_list(any_literal()));
    assert_eq!(values(&result.expect("list")), vec!["a"]);
    assert_eq!(consumed, 1);
}

#[test]
fn empty_list() {
    let (result, _) = run(";", comma_list(any_literal()));
    let err = result.expect_err("needs one element");
    assert!(matches!(err.kind, ParseErrorKind::EmptyList { .. }));
    assert_eq!(err.position, Position::START);

    let (result, consumed) = run(";", list(any_literal(), symbol("|"), true));
    assert_eq!(result, Ok(vec![]));
    assert_eq!(consumed, 0);
}

#[test]
fn repeat_stops_at_first_failure() {
    let (result, consumed) = run("a b ;", repeat(any_literal()));
    assert_eq!(values(&result.expect("repeat")), vec!["a", "b"]);
    assert_eq!(consumed, 3);
}

#[test]
fn strict_repeat_returns_failure() {
    let (result, _) = run("a b", strict_repeat(any_literal()));
    assert_eq!(values(&result.expect("all literals")), vec!["a", "b"]);

    let (result, _) = run("a ;", strict_repeat(any_literal()));
    let err = result.expect_err("';' is not a literal");
    assert_eq!(err.position, Position::new(1, 3));
}

// -----------------------------------------------------------
// Blocks.
// -----------------------------------------------------------

#[test]
fn block_parses_interior() {
    let parser = block(&[TokenKind::LazyBlock], names);
    let (result, consumed) = run("{ a, b } c", parser);
    let tokens = result.expect("block");
    assert_eq!(values(&tokens), vec!["a", "b"]);
    assert_eq!(tokens[1].position, Position::new(1, 6));
    assert_eq!(consumed, 1);
}

#[test]
fn block_requires_full_interior() {
    let (result, _) = run("{ a b }", block(&[TokenKind::LazyBlock], names));
    let err = result.expect_err("leftover token");
    assert!(err.is_block());
    assert_eq!(err.position, Position::new(1, 5));
    assert_eq!(
        err.root_cause().kind,
        ParseErrorKind::UnexpectedToken { found: "b".into() }
    );
}

#[test]
fn lazy_block_defers_interior() {
    let (result, consumed) = run("{ a b }", lazy_block(&[TokenKind::LazyBlock], names));
    let deferred = result.expect("token matched without parsing");
    assert_eq!(consumed, 1);
    assert_eq!(deferred.token().value, "{ a b }");
    assert!(deferred.parse().expect_err("leftover token").is_block());

    let (result, _) = run("{a,b}", lazy_block(&[TokenKind::LazyBlock], names));
    let tokens = result.expect("token").parse().expect("interior");
    assert_eq!(values(&tokens), vec!["a", "b"]);
}

#[test]
fn nested_block_errors_keep_source_positions() {
    let inner = block(&[TokenKind::RoundBrackets], keyword("a"));
    let parser = block(&[TokenKind::LazyBlock], inner);
    let (result, _) = run("{\n  (\n    b)\n}", parser);
    let err = result.expect_err("wrong keyword");
    assert_eq!(err.position, Position::new(3, 5));
    assert!(matches!(
        err.cause().map(|cause| &cause.kind),
        Some(ParseErrorKind::Block { .. })
    ));
    assert_eq!(
        err.root_cause().kind,
        ParseErrorKind::Expected {
            expected: "'a'".into(),
            found: "b".into(),
        }
    );
}

#[test]
fn block_lex_errors_are_block_errors() {
    let (result, _) = run("{ 'a\nb' }", block(&[TokenKind::LazyBlock], names));
    let err = result.expect_err("unterminated string");
    assert!(err.is_block());
    assert!(matches!(err.root_cause().kind, ParseErrorKind::Lex(_)));
    assert_eq!(err.position, Position::new(1, 3));
}

// -----------------------------------------------------------
// Source capture.
// -----------------------------------------------------------

#[test]
fn raw_value_keeps_leading_trivia() {
    let parser = raw_value(sequence((keyword("a"), keyword("b"))));
    let (result, _) = run("  a  b", parser);
    assert_eq!(result, Ok("  a  b".to_string()));
}

#[test]
fn raw_value_with_position_trims() {
    let parser = raw_value_with_position(sequence((keyword("a"), keyword("b"))));
    let (result, _) = run("  a  b", parser);
    let raw = result.expect("raw");
    assert_eq!(raw.value, "a  b");
    assert_eq!(raw.position, Position::new(1, 3));
}
