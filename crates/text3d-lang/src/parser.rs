//! Overlay markup parser: tokens → AST.

use text3d_core::Style;

use crate::ansi;
use crate::ast::*;
use crate::lexer::{Token, TokenKind};

/// The overlay markup parser.
///
/// Keeps the current color and a toggle-based style stack: a marker equal to
/// the active style closes it, any other marker opens a new one on top.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    current_color: String,
    current_style: Style,
    style_stack: Vec<Style>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            current_color: ansi::BASE_COLOR.to_string(),
            current_style: Style::Regular,
            style_stack: Vec::new(),
        }
    }

    /// Parse the token stream into a flat RootNode. Never fails.
    pub fn parse(&mut self) -> RootNode {
        let mut root = RootNode::default();

        while let Some(token) = self.advance() {
            match token.kind {
                TokenKind::Text => root.children.push(Node::Text(TextNode {
                    value: token.value,
                    color: self.current_color.clone(),
                    style: self.current_style,
                })),
                TokenKind::Emote(emote_id) => root.children.push(Node::Emote(EmoteNode {
                    emote_id,
                    color: self.current_color.clone(),
                    style: self.current_style,
                })),
                TokenKind::Color(color) => self.current_color = color,
                TokenKind::Style(style) => self.toggle_style(style),
                TokenKind::Eof => break,
            }
        }

        if !self.style_stack.is_empty() {
            tracing::debug!(
                open = self.style_stack.len(),
                style = %self.current_style,
                "markup ended with unclosed style markers"
            );
        }

        root
    }

    /// Style active after the tokens consumed so far.
    pub fn current_style(&self) -> Style {
        self.current_style
    }

    pub fn current_color(&self) -> &str {
        &self.current_color
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    fn toggle_style(&mut self, style: Style) {
        if style == self.current_style {
            self.current_style = self.style_stack.pop().unwrap_or_default();
        } else {
            self.style_stack.push(self.current_style);
            self.current_style = style;
        }
    }
}

/// Convenience wrapper around [`Parser::parse`].
pub fn parse(tokens: Vec<Token>) -> RootNode {
    Parser::new(tokens).parse()
}
