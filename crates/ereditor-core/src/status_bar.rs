//! Word and character counts.

use crate::engine::EditorEngine;

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Whitespace-separated word count. Blank text has no words. A byte order
/// mark separates words too.
pub fn word_count(text: &str) -> usize {
    text.split(is_separator).filter(|word| !word.is_empty()).count()
}

/// Length of the plain-text projection in UTF-16 code units, as browsers
/// report string length.
pub fn character_count(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Counts for the status bar, recomputed from the engine on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusBar {
    pub words: usize,
    pub characters: usize,
}

impl StatusBar {
    pub fn from_text(text: &str) -> Self {
        Self {
            words: word_count(text),
            characters: character_count(text),
        }
    }

    pub fn from_engine(engine: &dyn EditorEngine) -> Self {
        Self::from_text(&engine.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("\n\t "), 0);
        assert_eq!(word_count("a b  c"), 3);
        assert_eq!(word_count("  leading and trailing  "), 3);
        assert_eq!(word_count("line\nbreaks\tand tabs"), 4);
        assert_eq!(word_count("a\u{feff}b"), 2);
        assert_eq!(word_count("\u{feff}\u{a0}"), 0);
    }

    #[test]
    fn test_character_count_is_per_utf16_unit() {
        assert_eq!(character_count(""), 0);
        assert_eq!(character_count("héllo"), 5);
        assert_eq!(character_count("a b"), 3);
        assert_eq!(character_count("😀"), 2);
        assert_eq!(character_count("hi 😀"), 5);
    }

    #[test]
    fn test_status_bar_from_text() {
        assert_eq!(
            StatusBar::from_text("Hello world"),
            StatusBar {
                words: 2,
                characters: 11
            }
        );
    }
}
