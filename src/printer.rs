//! Turning syntax trees back into text.
//!
//! [`to_source`] reproduces the parsed input exactly. [`dump`] renders an
//! indented outline of the tree, one node per line.

use std::fmt::Write;

use crate::ast::Node;

/// Concatenate the exact source of every node.
#[must_use]
pub fn to_source(items: &[Node]) -> String {
    items.iter().map(Node::source).collect()
}

/// Indented outline of `items` and their children.
#[must_use]
pub fn dump(items: &[Node]) -> String {
    let mut out = String::new();
    dump_items(&mut out, items, 0);
    out
}

fn dump_items(out: &mut String, items: &[Node], depth: usize) {
    for item in items {
        dump_node(out, item, depth);
    }
}

fn dump_node(out: &mut String, node: &Node, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    let _ = write!(out, "{:?} {}", node.node_type(), node.position());

    match node {
        Node::Ignore(text) | Node::Raw(text) => {
            let _ = write!(out, " {:?}", text.value);
        }
        Node::CssImport(import) => {
            let _ = write!(out, " {}", import.path);
            if let Some(media) = &import.media {
                let _ = write!(out, " media={media}");
            }
        }
        Node::CssCharset(charset) => {
            let _ = write!(out, " {}", charset.charset);
        }
        Node::CssMedia(media) => {
            let _ = write!(out, " {}", media.media);
        }
        Node::CssPage(page) => {
            if let Some(pseudo) = &page.pseudo {
                let _ = write!(out, " {pseudo}");
            }
        }
        Node::CssBlock(block) | Node::JssBlock(block) => {
            let _ = write!(out, " {}", block.selector_texts().join(", "));
        }
        Node::CssDeclaration(declaration) | Node::JssDeclaration(declaration) => {
            let _ = write!(out, " {} = {}", declaration.property, declaration.value);
            if declaration.important {
                out.push_str(" !important");
            }
        }
        Node::CssSelector(selector) | Node::JssSelector(selector) => {
            let _ = write!(out, " {:?}", selector.fragments);
        }
        Node::JssSpread(spread) => {
            let _ = write!(out, " {}", spread.expression);
        }
        Node::JssVarDeclaration(var) => {
            if var.exported {
                out.push_str(" export");
            }
            let _ = write!(out, " {} {}", var.keyword, var.name);
        }
    }
    out.push('\n');

    if let Some(children) = node.items() {
        dump_items(out, children, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Block, Declaration, Selector, Text};
    use crate::position::Position;

    fn sample() -> Vec<Node> {
        let declaration = Declaration {
            property: "color".into(),
            property_position: Position::new(1, 5),
            value: "red".into(),
            value_position: Position::new(1, 12),
            important: true,
            raw: "color: red !important;".into(),
        };
        let block = Block {
            selectors: vec![Node::CssSelector(Selector {
                fragments: vec!["a".into()],
                raw: "a".into(),
                position: Position::START,
            })],
            items: vec![
                Node::Ignore(Text {
                    value: " ".into(),
                    position: Position::new(1, 4),
                }),
                Node::CssDeclaration(declaration),
            ],
            raw: "a { color: red !important; }".into(),
            position: Position::START,
        };
        vec![
            Node::CssBlock(block),
            Node::Ignore(Text {
                value: "\n".into(),
                position: Position::new(1, 29),
            }),
        ]
    }

    #[test]
    fn source_is_concatenated() {
        assert_eq!(to_source(&sample()), "a { color: red !important; }\n");
    }

    #[test]
    fn dump_indents_children() {
        let expected = "\
CssBlock 1:1 a
  Ignore 1:4 \" \"
  CssDeclaration 1:5 color = red !important
Ignore 1:29 \"\\n\"
";
        assert_eq!(dump(&sample()), expected);
    }
}
