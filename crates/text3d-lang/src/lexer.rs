use std::fmt;

use serde::Serialize;
use text3d_core::Style;

use crate::ansi;

/// Source location for diagnostics, in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Token kinds in overlay markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// A run of plain text.
    Text,
    /// A recognised color escape, carrying the resolved color name.
    Color(String),
    /// One to three `*`.
    Style(Style),
    /// `:digits:`, carrying the numeric id.
    Emote(String),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Text => write!(f, "text"),
            TokenKind::Color(name) => write!(f, "color({})", name),
            TokenKind::Style(style) => write!(f, "style({})", style),
            TokenKind::Emote(id) => write!(f, "emote({})", id),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

/// A token with its kind, raw source text and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    /// Offset of the first character of this token.
    pub fn position(&self) -> usize {
        self.span.start
    }
}

/// The overlay markup lexer.
///
/// Total over its input: every character ends up in exactly one token and
/// anything that is not well-formed markup becomes text.
pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire source. The last token is always `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while self.peek().is_some() {
            let token = self
                .scan_color()
                .or_else(|| self.scan_emote())
                .or_else(|| self.scan_style())
                .unwrap_or_else(|| self.scan_text());
            tokens.push(token);
        }
        tokens.push(Token::new(
            TokenKind::Eof,
            "",
            Span::new(self.pos, self.pos, self.line, self.column),
        ));
        tokens
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.source.get(self.pos).copied()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consume `count` characters and return them as a token.
    fn take(&mut self, count: usize, kind: TokenKind) -> Token {
        let start = self.pos;
        let (line, column) = (self.line, self.column);
        let mut value = String::with_capacity(count);
        for _ in 0..count {
            match self.advance() {
                Some(ch) => value.push(ch),
                None => break,
            }
        }
        Token::new(kind, value, Span::new(start, self.pos, line, column))
    }

    fn at_escape_prefix(&self, at: usize) -> bool {
        ansi::ESCAPE_PREFIX
            .chars()
            .enumerate()
            .all(|(i, p)| self.source.get(at + i) == Some(&p))
    }

    fn at_marker(&self, at: usize) -> bool {
        matches!(self.source.get(at), Some('*') | Some(':')) || self.at_escape_prefix(at)
    }

    fn scan_color(&mut self) -> Option<Token> {
        if !self.at_escape_prefix(self.pos) {
            return None;
        }
        let end = self.source[self.pos..]
            .iter()
            .position(|&c| c == ansi::ESCAPE_TERMINATOR)?;
        let sequence: String = self.source[self.pos..=self.pos + end].iter().collect();
        let name = ansi::color_for_sequence(&sequence)?;
        Some(self.take(end + 1, TokenKind::Color(name.to_string())))
    }

    fn scan_emote(&mut self) -> Option<Token> {
        if self.peek() != Some(':') {
            return None;
        }
        let close = self.source[self.pos + 1..].iter().position(|&c| c == ':')?;
        let id: String = self.source[self.pos + 1..self.pos + 1 + close].iter().collect();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Some(self.take(close + 2, TokenKind::Emote(id)))
    }

    fn scan_style(&mut self) -> Option<Token> {
        let count = self.source[self.pos..]
            .iter()
            .take(3)
            .take_while(|&&c| c == '*')
            .count();
        let style = Style::from_marker_len(count)?;
        Some(self.take(count, TokenKind::Style(style)))
    }

    /// Text runs always take the current character, so a `:` or escape that
    /// failed to match above is still consumed.
    fn scan_text(&mut self) -> Token {
        let len = 1 + (self.pos + 1..self.source.len())
            .take_while(|&i| !self.at_marker(i))
            .count();
        self.take(len, TokenKind::Text)
    }
}

/// Convenience wrapper around [`Lexer::tokenize`].
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).into_iter().map(|t| t.kind).collect()
    }

    fn strip_markup(src: &str) -> String {
        tokenize(src)
            .into_iter()
            .filter(|t| t.kind == TokenKind::Text)
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn test_plain_text() {
        let tokens = tokenize("hello world");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert_eq!(tokens[0].value, "hello world");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
        assert_eq!(tokens[1].position(), 11);
    }

    #[test]
    fn test_empty_input_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_italic_example() {
        let tokens = tokenize("Hi *there*!");
        let summary: Vec<(TokenKind, &str, usize)> = tokens
            .iter()
            .map(|t| (t.kind.clone(), t.value.as_str(), t.position()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (TokenKind::Text, "Hi ", 0),
                (TokenKind::Style(Style::Italic), "*", 3),
                (TokenKind::Text, "there", 4),
                (TokenKind::Style(Style::Italic), "*", 9),
                (TokenKind::Text, "!", 10),
                (TokenKind::Eof, "", 11),
            ]
        );
    }

    #[test]
    fn test_style_marker_lengths() {
        assert_eq!(
            kinds("**a***b****"),
            vec![
                TokenKind::Style(Style::Bold),
                TokenKind::Text,
                TokenKind::Style(Style::BoldItalic),
                TokenKind::Text,
                TokenKind::Style(Style::BoldItalic),
                TokenKind::Style(Style::Italic),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_emote_token() {
        let tokens = tokenize(":123:");
        assert_eq!(tokens[0].kind, TokenKind::Emote("123".into()));
        assert_eq!(tokens[0].value, ":123:");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_non_numeric_emote_is_text() {
        assert_eq!(strip_markup(":12a:"), ":12a:");
        assert!(tokenize(":12a:")
            .iter()
            .all(|t| matches!(t.kind, TokenKind::Text | TokenKind::Eof)));
    }

    #[test]
    fn test_lone_and_empty_colons_are_text() {
        assert_eq!(strip_markup("a:b"), "a:b");
        assert_eq!(strip_markup("::"), "::");
        assert_eq!(strip_markup("ratio 16:9"), "ratio 16:9");
    }

    #[test]
    fn test_colon_before_emote() {
        assert_eq!(
            kinds("::25: x"),
            vec![
                TokenKind::Text,
                TokenKind::Emote("25".into()),
                TokenKind::Text,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_color_escape() {
        let tokens = tokenize("\x1b[31mred\x1b[0m");
        assert_eq!(tokens[0].kind, TokenKind::Color("RED".into()));
        assert_eq!(tokens[0].value, "\x1b[31m");
        assert_eq!(tokens[1].value, "red");
        assert_eq!(tokens[1].position(), 5);
        assert_eq!(tokens[2].kind, TokenKind::Color("WHITE".into()));
    }

    #[test]
    fn test_unknown_escape_degrades_to_text() {
        let src = "\x1b[1mbold?";
        assert_eq!(strip_markup(src), src);
        let unterminated = "\x1b[31";
        assert_eq!(strip_markup(unterminated), unterminated);
    }

    #[test]
    fn test_text_stops_at_markers() {
        let tokens = tokenize("ab\x1b[32mcd*ef:1:");
        let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["ab", "\x1b[32m", "cd", "*", "ef", ":1:", ""]);
    }

    #[test]
    fn test_markup_stripping_covers_all_text() {
        let src = "\x1b[36mGG :25: **well** played\x1b[0m :)";
        assert_eq!(strip_markup(src), "GG  well played :)");
    }

    #[test]
    fn test_values_cover_source() {
        let src = "x\x1b[9m*:7::a:\n***b";
        let joined: String = tokenize(src).into_iter().map(|t| t.value).collect();
        assert_eq!(joined, src);
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = tokenize("one\n*two*");
        assert_eq!(tokens[1].kind, TokenKind::Style(Style::Italic));
        assert_eq!(tokens[1].span.line, 2);
        assert_eq!(tokens[1].span.column, 1);
    }

    #[test]
    fn test_positions_are_char_offsets() {
        let tokens = tokenize("héllo *x*");
        assert_eq!(tokens[1].position(), 6);
    }

    #[test]
    fn test_every_short_input_is_covered_exactly() {
        const ALPHABET: [char; 11] = ['a', '*', ':', '7', ' ', '\x1b', '[', '3', '1', 'm', '\n'];
        let mut checked = 0;
        for len in 0..=4u32 {
            for mut n in 0..ALPHABET.len().pow(len) {
                let mut src = String::new();
                for _ in 0..len {
                    src.push(ALPHABET[n % ALPHABET.len()]);
                    n /= ALPHABET.len();
                }

                let tokens = tokenize(&src);
                let (eof, body) = tokens.split_last().unwrap();
                assert_eq!(eof.kind, TokenKind::Eof, "input {:?}", src);
                assert_eq!(eof.span.start, src.chars().count(), "input {:?}", src);

                let mut offset = 0;
                for token in body {
                    assert!(!token.value.is_empty(), "empty token in {:?}", src);
                    assert_ne!(token.kind, TokenKind::Eof, "early EOF in {:?}", src);
                    assert_eq!(token.span.start, offset, "gap before {:?} in {:?}", token, src);
                    offset = token.span.end;
                    if let TokenKind::Emote(id) = &token.kind {
                        assert!(id.chars().all(|c| c.is_ascii_digit()), "input {:?}", src);
                    }
                }

                let joined: String = body.iter().map(|t| t.value.as_str()).collect();
                assert_eq!(joined, src);
                checked += 1;
            }
        }
        assert_eq!(checked, 1 + 11 + 121 + 1331 + 14641);
    }
}
