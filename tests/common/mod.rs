#![allow(dead_code)]

use jss_parser::combinator::{PResult, Parser};
use jss_parser::{
    Dialect, LexerConfig, Node, NodeType, Position, Stylesheet, TokenStream, parse, tokenize,
};

/// Parse `input`, assert that the tree prints back to it, and return it.
pub fn roundtrip(input: &str, dialect: Dialect) -> Stylesheet {
    let sheet = parse(input, dialect)
        .unwrap_or_else(|e| panic!("parse failed: {e}\n--- input ---\n{input}"));
    let output = sheet.to_source();
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
    sheet
}

pub fn jss(input: &str) -> Stylesheet {
    roundtrip(input, Dialect::Jss)
}

pub fn css(input: &str) -> Stylesheet {
    roundtrip(input, Dialect::Css)
}

/// Items other than whitespace and comments.
pub fn significant(items: &[Node]) -> Vec<&Node> {
    items.iter().filter(|item| !item.is_ignore()).collect()
}

pub fn node_types(items: &[Node]) -> Vec<NodeType> {
    significant(items).into_iter().map(Node::node_type).collect()
}

/// Run `parser` over `input` from the start; returns the result and the
/// number of tokens consumed.
pub fn run<T>(input: &str, parser: impl Parser<T>) -> (PResult<T>, usize) {
    let tokens = tokenize(input).expect("tokenize failed");
    let config = LexerConfig::default();
    let mut stream = TokenStream::new(&tokens, &config, Position::START);
    let result = parser.parse(&mut stream);
    (result, stream.current_position())
}
