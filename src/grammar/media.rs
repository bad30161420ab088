//! Media query lists, as used by `@media` and `@import`.
//!
//! ```text
//! media_query = (only | not)? media_type (and expression)*
//!             | expression (and expression)*
//! expression  = "(" feature (":" value)? ")"
//! ```

use crate::combinator::{
    PResult, Parser, RawValue, block, comma_list, keyword, left_recursive, optional, raw_value,
    raw_value_with_position, sequence, symbol,
};
use crate::stream::TokenStream;
use crate::token::TokenKind;

use super::css_ident;

/// Comma-separated media queries, returned as written.
pub fn media_query_list(stream: &mut TokenStream<'_>) -> PResult<RawValue> {
    raw_value_with_position(comma_list(media_query)).parse(stream)
}

pub fn media_query(stream: &mut TokenStream<'_>) -> PResult<String> {
    let modifier = crate::first_of![keyword("only"), keyword("not")];
    crate::first_of![
        left_recursive(
            raw_value(sequence((optional(modifier), css_ident))),
            and_expression,
        ),
        left_recursive(media_expression, and_expression),
    ]
    .parse(stream)
}

fn and_expression(stream: &mut TokenStream<'_>) -> PResult<String> {
    raw_value(sequence((keyword("and"), media_expression))).parse(stream)
}

fn media_expression(stream: &mut TokenStream<'_>) -> PResult<String> {
    raw_value(block(&[TokenKind::RoundBrackets], media_feature)).parse(stream)
}

fn media_feature(stream: &mut TokenStream<'_>) -> PResult<()> {
    sequence((css_ident, optional(sequence((symbol(":"), feature_value))))).parse(stream)?;
    Ok(())
}

fn feature_value(stream: &mut TokenStream<'_>) -> PResult<()> {
    let mut significant = false;
    while let Some(token) = stream.next() {
        significant |= !token.is_trivia();
    }
    if significant {
        Ok(())
    } else {
        Err(stream.expected("media feature value"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LexerConfig;
    use crate::lexer::tokenize;
    use crate::position::Position;

    fn query_list(input: &str) -> (PResult<RawValue>, usize) {
        let tokens = tokenize(input).expect("tokenize");
        let config = LexerConfig::default();
        let mut stream = TokenStream::new(&tokens, &config, Position::START);
        let result = media_query_list(&mut stream);
        (result, stream.current_position())
    }

    #[test]
    fn type_with_expressions() {
        let (result, _) = query_list("only screen and (min-width: 100px) and (color) {}");
        assert_eq!(
            result.expect("media").value,
            "only screen and (min-width: 100px) and (color)"
        );
    }

    #[test]
    fn several_queries() {
        let (result, _) = query_list(" print, (orientation: landscape)");
        let raw = result.expect("media");
        assert_eq!(raw.value, "print, (orientation: landscape)");
        assert_eq!(raw.position, Position::new(1, 2));
    }

    #[test]
    fn malformed_feature_is_block_error() {
        let (result, _) = query_list("screen and (min-width 100px)");
        let err = result.expect_err("bad feature");
        assert!(err.is_block());
        assert_eq!(err.position, Position::new(1, 23));
    }

    #[test]
    fn empty_feature_value() {
        let (result, _) = query_list("(width:)");
        assert!(result.expect_err("no value").is_block());
    }
}
