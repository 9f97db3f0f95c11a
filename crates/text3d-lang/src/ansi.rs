//! ANSI color escapes recognised inside overlay markup.

/// Prefix shared by every color escape.
pub const ESCAPE_PREFIX: &str = "\x1b[";

/// Character that terminates an escape sequence.
pub const ESCAPE_TERMINATOR: char = 'm';

/// Known escape sequences and the color names they select.
pub const ANSI_COLORS: &[(&str, &str)] = &[
    ("\x1b[0m", "WHITE"),
    ("\x1b[31m", "RED"),
    ("\x1b[32m", "GREEN"),
    ("\x1b[33m", "YELLOW"),
    ("\x1b[34m", "BLUE"),
    ("\x1b[35m", "MAGENTA"),
    ("\x1b[36m", "CYAN"),
];

/// Color name used before any escape is seen.
pub const BASE_COLOR: &str = "WHITE";

/// Look up the color name for a complete escape sequence.
pub fn color_for_sequence(sequence: &str) -> Option<&'static str> {
    ANSI_COLORS
        .iter()
        .find(|(seq, _)| *seq == sequence)
        .map(|(_, name)| *name)
}

/// Escape sequence for a color name, for building markup programmatically.
pub fn sequence_for_color(name: &str) -> Option<&'static str> {
    ANSI_COLORS
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(seq, _)| *seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_ways() {
        assert_eq!(color_for_sequence("\x1b[31m"), Some("RED"));
        assert_eq!(color_for_sequence("\x1b[1m"), None);
        assert_eq!(sequence_for_color("CYAN"), Some("\x1b[36m"));
    }

    #[test]
    fn test_every_sequence_has_prefix_and_terminator() {
        for (seq, _) in ANSI_COLORS {
            assert!(seq.starts_with(ESCAPE_PREFIX));
            assert!(seq.ends_with(ESCAPE_TERMINATOR));
        }
    }
}
