//! Overlay markup Abstract Syntax Tree (AST).
//!
//! The tree is flat: color and style are resolved during parsing and stamped
//! onto every leaf, so the generator never needs to track scope.

use serde::Serialize;
use text3d_core::Style;

/// Top-level AST node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RootNode {
    pub children: Vec<Node>,
}

/// A leaf under the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Text(TextNode),
    Emote(EmoteNode),
}

/// A run of text with the color and style active when it was read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextNode {
    pub value: String,
    /// Color name, resolved to RGB by the generator.
    pub color: String,
    pub style: Style,
}

/// An inline emote image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmoteNode {
    pub emote_id: String,
    pub color: String,
    pub style: Style,
}

impl Node {
    pub fn color(&self) -> &str {
        match self {
            Node::Text(text) => &text.color,
            Node::Emote(emote) => &emote.color,
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Node::Text(text) => text.style,
            Node::Emote(emote) => emote.style,
        }
    }
}
