//! Lexer edge cases and error tests.

use jss_parser::lexer::tokenize_with;
use jss_parser::{LexErrorKind, Lexer, LexerConfig, Position, TokenKind, tokenize};
use pretty_assertions::assert_eq;

fn pairs(input: &str) -> Vec<(TokenKind, String)> {
    tokenize(input)
        .expect("tokenize")
        .into_iter()
        .map(|t| (t.kind, t.value))
        .collect()
}

fn pair(kind: TokenKind, value: &str) -> (TokenKind, String) {
    (kind, value.to_string())
}

// -----------------------------------------------------------
// Basic lexer behaviour.
// -----------------------------------------------------------

#[test]
fn lex_empty_input() {
    let tokens = tokenize("").expect("tokenize");
    assert!(tokens.is_empty());
}

#[test]
fn lex_whitespace_is_one_token_per_run() {
    assert_eq!(pairs(" \t\n\r "), vec![pair(TokenKind::Space, " \t\n\r ")]);
}

#[test]
fn lex_sizes() {
    assert_eq!(
        pairs("10% 10px 0.1em"),
        vec![
            pair(TokenKind::Literal, "10"),
            pair(TokenKind::Symbol, "%"),
            pair(TokenKind::Space, " "),
            pair(TokenKind::Literal, "10px"),
            pair(TokenKind::Space, " "),
            pair(TokenKind::Literal, "0"),
            pair(TokenKind::Symbol, "."),
            pair(TokenKind::Literal, "1em"),
        ]
    );
}

#[test]
fn lex_empty_braces_are_one_lazy_block() {
    assert_eq!(pairs("{}"), vec![pair(TokenKind::LazyBlock, "{}")]);
}

#[test]
fn lex_interpolation_start() {
    assert_eq!(
        pairs("a-${b}"),
        vec![
            pair(TokenKind::Literal, "a"),
            pair(TokenKind::Symbol, "-"),
            pair(TokenKind::Literal, "$"),
            pair(TokenKind::LazyBlock, "{b}"),
        ]
    );
}

#[test]
fn lex_comma_is_its_own_kind() {
    assert_eq!(
        pairs("a,b"),
        vec![
            pair(TokenKind::Literal, "a"),
            pair(TokenKind::Comma, ","),
            pair(TokenKind::Literal, "b"),
        ]
    );
}

#[test]
fn lex_positions_track_lines() {
    let tokens = tokenize("a\n  b").expect("tokenize");
    assert_eq!(tokens[0].position, Position::new(1, 1));
    assert_eq!(tokens[2].position, Position::new(2, 3));
}

// -----------------------------------------------------------
// Strings and comments.
// -----------------------------------------------------------

#[test]
fn lex_strings_keep_quotes() {
    assert_eq!(
        pairs(r#"'a' "b\"c""#),
        vec![
            pair(TokenKind::String, "'a'"),
            pair(TokenKind::Space, " "),
            pair(TokenKind::String, r#""b\"c""#),
        ]
    );
}

#[test]
fn lex_string_cannot_span_lines() {
    let err = tokenize("x = 'abc\ndef'").expect_err("unterminated");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.position, Position::new(1, 5));
}

#[test]
fn lex_template_spans_lines() {
    assert_eq!(
        pairs("`a\n${b}\\``"),
        vec![pair(TokenKind::TemplateString, "`a\n${b}\\``")]
    );
}

#[test]
fn lex_unterminated_template() {
    let err = tokenize("`abc").expect_err("unterminated");
    assert_eq!(err.kind, LexErrorKind::UnterminatedTemplate);
}

#[test]
fn lex_comment_kinds() {
    assert_eq!(
        pairs("// line\n/* block */<!-- html -->"),
        vec![
            pair(TokenKind::Comment, "// line"),
            pair(TokenKind::Space, "\n"),
            pair(TokenKind::MultilineComment, "/* block */"),
            pair(TokenKind::CssComment, "<!-- html -->"),
        ]
    );
}

#[test]
fn lex_unterminated_block_comment_runs_to_end() {
    assert_eq!(
        pairs("a /* open"),
        vec![
            pair(TokenKind::Literal, "a"),
            pair(TokenKind::Space, " "),
            pair(TokenKind::MultilineComment, "/* open"),
        ]
    );
}

#[test]
fn lex_bare_angle_bracket_is_symbol() {
    assert_eq!(
        pairs("a<b"),
        vec![
            pair(TokenKind::Literal, "a"),
            pair(TokenKind::Symbol, "<"),
            pair(TokenKind::Literal, "b"),
        ]
    );
}

// -----------------------------------------------------------
// Brackets.
// -----------------------------------------------------------

#[test]
fn lex_round_brackets_skip_quoted_close() {
    assert_eq!(
        pairs(r"('1)\'')x"),
        vec![
            pair(TokenKind::RoundBrackets, r"('1)\'')"),
            pair(TokenKind::Literal, "x"),
        ]
    );
}

#[test]
fn lex_brackets_skip_comments_and_escapes() {
    assert_eq!(
        pairs("(a /* ) */ \\) // )\n)"),
        vec![pair(TokenKind::RoundBrackets, "(a /* ) */ \\) // )\n)")]
    );
}

#[test]
fn lex_nested_blocks_stay_whole() {
    let input = "{ a { b: `}` } [ ] }";
    assert_eq!(pairs(input), vec![pair(TokenKind::LazyBlock, input)]);
}

#[test]
fn lex_square_brackets() {
    assert_eq!(
        pairs("a[href$='x]']"),
        vec![
            pair(TokenKind::Literal, "a"),
            pair(TokenKind::SquareBrackets, "[href$='x]']"),
        ]
    );
}

#[test]
fn lex_unbalanced_reports_end_of_scan() {
    let err = tokenize("a {\n b").expect_err("unbalanced");
    assert_eq!(err.kind, LexErrorKind::BracketsDoNotMatch { open: '{' });
    assert_eq!(err.position, Position::new(2, 3));
}

#[test]
fn lex_stray_close_is_unexpected() {
    let err = tokenize("a }").expect_err("stray");
    assert_eq!(err.kind, LexErrorKind::UnexpectedSymbol('}'));
    assert_eq!(err.position, Position::new(1, 3));
    assert_eq!(
        err.to_string(),
        "unexpected symbol '}' (code 125) at line 1, column 3"
    );
}

// -----------------------------------------------------------
// Configuration.
// -----------------------------------------------------------

#[test]
fn lex_joined_symbols() {
    let config = LexerConfig::new().join_symbols(true);
    let tokens = Lexer::new(&config).tokenize("a**=b //c").expect("tokenize");
    let values: Vec<_> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["a", "**=", "b", " ", "//c"]);
}

#[test]
fn lex_eager_braces() {
    let config = LexerConfig::new().lazy_braces(false);
    let tokens = Lexer::new(&config).tokenize("{a}").expect("tokenize");
    assert_eq!(tokens[0].kind, TokenKind::Block);
}

#[test]
fn lex_custom_alphabet_rejects_other_symbols() {
    let config = LexerConfig::new().symbols(":;");
    let err = Lexer::new(&config).tokenize("a:b%").expect_err("no %");
    assert_eq!(err.kind, LexErrorKind::UnexpectedSymbol('%'));
}

#[test]
fn lex_from_origin() {
    let tokens = tokenize_with("a\nb", &LexerConfig::default(), Position::new(4, 7))
        .expect("tokenize");
    assert_eq!(tokens[0].position, Position::new(4, 7));
    assert_eq!(tokens[2].position, Position::new(5, 1));
}

#[test]
fn lex_skips_byte_order_mark() {
    let tokens = tokenize("\u{FEFF}a").expect("tokenize");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].position, Position::START);
}
