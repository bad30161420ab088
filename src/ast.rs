//! Syntax tree produced by the CSS and JSS grammars.
//!
//! Every node keeps the exact source it was parsed from, and item lists
//! keep whitespace and comments as [`Node::Ignore`] entries, so the
//! original text can always be rebuilt by concatenating node sources.

use std::fmt;

use serde::Serialize;

use crate::position::Position;

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stylesheet {
    pub items: Vec<Node>,
}

impl Stylesheet {
    /// The exact source the stylesheet was parsed from.
    #[must_use]
    pub fn to_source(&self) -> String {
        crate::printer::to_source(&self.items)
    }
}

/// Node discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeType {
    Ignore,
    Raw,
    CssImport,
    CssCharset,
    CssMedia,
    CssPage,
    CssBlock,
    JssBlock,
    CssDeclaration,
    JssDeclaration,
    CssSelector,
    JssSelector,
    JssSpread,
    JssVarDeclaration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    /// Whitespace and comments between statements.
    Ignore(Text),
    /// Script statement passed through verbatim.
    Raw(Text),
    CssImport(Import),
    CssCharset(Charset),
    CssMedia(Media),
    CssPage(Page),
    CssBlock(Block),
    JssBlock(Block),
    CssDeclaration(Declaration),
    JssDeclaration(Declaration),
    CssSelector(Selector),
    JssSelector(Selector),
    JssSpread(Spread),
    JssVarDeclaration(VarDeclaration),
}

impl Node {
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        match self {
            Self::Ignore(_) => NodeType::Ignore,
            Self::Raw(_) => NodeType::Raw,
            Self::CssImport(_) => NodeType::CssImport,
            Self::CssCharset(_) => NodeType::CssCharset,
            Self::CssMedia(_) => NodeType::CssMedia,
            Self::CssPage(_) => NodeType::CssPage,
            Self::CssBlock(_) => NodeType::CssBlock,
            Self::JssBlock(_) => NodeType::JssBlock,
            Self::CssDeclaration(_) => NodeType::CssDeclaration,
            Self::JssDeclaration(_) => NodeType::JssDeclaration,
            Self::CssSelector(_) => NodeType::CssSelector,
            Self::JssSelector(_) => NodeType::JssSelector,
            Self::JssSpread(_) => NodeType::JssSpread,
            Self::JssVarDeclaration(_) => NodeType::JssVarDeclaration,
        }
    }

    /// The exact source span of this node.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Ignore(node) | Self::Raw(node) => &node.value,
            Self::CssImport(node) => &node.raw,
            Self::CssCharset(node) => &node.raw,
            Self::CssMedia(node) => &node.raw,
            Self::CssPage(node) => &node.raw,
            Self::CssBlock(node) | Self::JssBlock(node) => &node.raw,
            Self::CssDeclaration(node) | Self::JssDeclaration(node) => &node.raw,
            Self::CssSelector(node) | Self::JssSelector(node) => &node.raw,
            Self::JssSpread(node) => &node.raw,
            Self::JssVarDeclaration(node) => &node.raw,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Ignore(node) | Self::Raw(node) => node.position,
            Self::CssImport(node) => node.position,
            Self::CssCharset(node) => node.position,
            Self::CssMedia(node) => node.position,
            Self::CssPage(node) => node.position,
            Self::CssBlock(node) | Self::JssBlock(node) => node.position,
            Self::CssDeclaration(node) | Self::JssDeclaration(node) => node.property_position,
            Self::CssSelector(node) | Self::JssSelector(node) => node.position,
            Self::JssSpread(node) => node.position,
            Self::JssVarDeclaration(node) => node.position,
        }
    }

    /// Child items of nodes that contain a block body.
    #[must_use]
    pub fn items(&self) -> Option<&[Self]> {
        match self {
            Self::CssMedia(node) => Some(&node.items),
            Self::CssPage(node) => Some(&node.items),
            Self::CssBlock(node) | Self::JssBlock(node) => Some(&node.items),
            Self::JssVarDeclaration(node) => Some(&node.items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_selector(&self) -> Option<&Selector> {
        match self {
            Self::CssSelector(node) | Self::JssSelector(node) => Some(node),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Self::CssDeclaration(node) | Self::JssDeclaration(node) => Some(node),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_block(&self) -> Option<&Block> {
        match self {
            Self::CssBlock(node) | Self::JssBlock(node) => Some(node),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_ignore(&self) -> bool {
        matches!(self, Self::Ignore(_))
    }
}

/// Verbatim text: whitespace/comments for `Ignore`, a statement for `Raw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    pub value: String,
    pub position: Position,
}

/// `@import <path> <media>?;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    /// Quoted string or `url(...)`, as written.
    pub path: String,
    pub media: Option<String>,
    pub raw: String,
    pub position: Position,
}

/// `@charset "<name>";`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Charset {
    pub charset: String,
    pub raw: String,
    pub position: Position,
}

/// `@media <query list> { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Media {
    pub media: String,
    pub media_position: Position,
    pub items: Vec<Node>,
    pub raw: String,
    pub position: Position,
}

/// `@page <:pseudo>? { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub pseudo: Option<String>,
    pub items: Vec<Node>,
    pub raw: String,
    pub position: Position,
}

/// A rule: selector list and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// `CssSelector` or `JssSelector` nodes.
    pub selectors: Vec<Node>,
    pub items: Vec<Node>,
    pub raw: String,
    pub position: Position,
}

impl Block {
    /// Selector texts, one per comma-separated selector.
    #[must_use]
    pub fn selector_texts(&self) -> Vec<&str> {
        self.selectors
            .iter()
            .filter_map(Node::as_selector)
            .map(|selector| selector.raw.as_str())
            .collect()
    }

    /// Declarations directly inside this block.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.items.iter().filter_map(Node::as_declaration)
    }
}

/// `property: value !important;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub property: String,
    pub property_position: Position,
    pub value: String,
    pub value_position: Position,
    pub important: bool,
    pub raw: String,
}

/// One complex selector. Combinators are kept inline as fragments, with
/// descendant combinators as `" "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selector {
    pub fragments: Vec<String>,
    pub raw: String,
    pub position: Position,
}

/// `...expression;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Spread {
    pub expression: String,
    pub expression_position: Position,
    pub raw: String,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarKeyword {
    Const,
    Let,
    Var,
}

impl VarKeyword {
    #[must_use]
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text {
            "const" => Some(Self::Const),
            "let" => Some(Self::Let),
            "var" => Some(Self::Var),
            _ => None,
        }
    }
}

impl fmt::Display for VarKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const => write!(f, "const"),
            Self::Let => write!(f, "let"),
            Self::Var => write!(f, "var"),
        }
    }
}

/// `export? const|let|var name = { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarDeclaration {
    pub keyword: VarKeyword,
    pub name: String,
    pub exported: bool,
    pub items: Vec<Node>,
    pub raw: String,
    pub position: Position,
}
