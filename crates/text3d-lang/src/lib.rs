//! # text3d-lang
//!
//! Overlay markup front end.
//! Turns a chat-style string with ANSI colors, `*` style markers and `:id:`
//! emotes into tokens, then into a flat AST of styled leaves.

pub mod ansi;
pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{EmoteNode, Node, RootNode, TextNode};
pub use lexer::{tokenize, Lexer, Span, Token, TokenKind};
pub use parser::{parse, Parser};
