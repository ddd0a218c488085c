use std::mem;
use unicode_segmentation::UnicodeSegmentation;

pub const FONT_FAMILY: &str = "Sans";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub size: f64,
    pub bold: bool,
}

impl FontSpec {
    pub const fn bold(size: f64) -> Self {
        Self { size, bold: true }
    }
}

/// Horizontal advance of a run of text. Wrapping is only correct when the
/// measure is monotonic: appending characters never makes text narrower.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font: &FontSpec) -> f64;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, &FontSpec) -> f64,
{
    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        self(text, font)
    }
}

/// Greedily packs whitespace-separated words into lines no wider than
/// `max_width`. A word that alone exceeds the width is broken between
/// grapheme clusters; a single cluster wider than the limit still gets a line.
pub fn wrap_label(
    text: &str,
    max_width: f64,
    font: &FontSpec,
    measure: &impl TextMeasure,
) -> Vec<String> {
    let fits = |s: &str| measure.text_width(s, font) <= max_width;
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if fits(&candidate) {
            line = candidate;
            continue;
        }

        if !line.is_empty() {
            lines.push(mem::take(&mut line));
        }
        if fits(word) {
            line = word.to_string();
        } else {
            let mut pieces = break_word(word, &fits);
            line = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn break_word(word: &str, fits: &impl Fn(&str) -> bool) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for grapheme in word.graphemes(true) {
        piece.push_str(grapheme);
        if !fits(&piece) && piece.len() > grapheme.len() {
            piece.truncate(piece.len() - grapheme.len());
            pieces.push(mem::replace(&mut piece, grapheme.to_string()));
        }
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT: FontSpec = FontSpec::bold(10.0);

    // every char is 10 units wide
    fn measure(text: &str, _font: &FontSpec) -> f64 {
        text.chars().count() as f64 * 10.0
    }

    #[test]
    fn test_short_label_is_one_line() {
        assert_eq!(wrap_label("Extrude", 100.0, &FONT, &measure), vec!["Extrude"]);
    }

    #[test]
    fn test_greedy_packing() {
        let lines = wrap_label("Move Rotate Scale Pivot", 120.0, &FONT, &measure);
        assert_eq!(lines, vec!["Move Rotate", "Scale Pivot"]);
    }

    #[test]
    fn test_exact_width_fits() {
        assert_eq!(wrap_label("ab cd", 50.0, &FONT, &measure), vec!["ab cd"]);
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let lines = wrap_label("  Edge \t  Loop \n", 200.0, &FONT, &measure);
        assert_eq!(lines, vec!["Edge Loop"]);
    }

    #[test]
    fn test_empty_label_has_no_lines() {
        assert!(wrap_label("", 100.0, &FONT, &measure).is_empty());
        assert!(wrap_label("   ", 100.0, &FONT, &measure).is_empty());
    }

    #[test]
    fn test_long_word_is_broken() {
        let lines = wrap_label("Subdivision mesh", 40.0, &FONT, &measure);
        assert_eq!(lines, vec!["Subd", "ivis", "ion", "mesh"]);
        assert!(lines.iter().all(|l| measure(l, &FONT) <= 40.0));
    }

    #[test]
    fn test_combining_mark_stays_with_its_base() {
        // "e" + U+0301 is one cluster but two chars, 20 units wide
        let lines = wrap_label("Cafe\u{301}", 40.0, &FONT, &measure);
        assert_eq!(lines, vec!["Caf", "e\u{301}"]);
        assert!(lines.iter().all(|l| !l.starts_with('\u{301}')));
    }

    #[test]
    fn test_emoji_sequence_is_not_split() {
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let lines = wrap_label(&format!("ab{family}"), 30.0, &FONT, &measure);
        assert_eq!(lines.last().map(String::as_str), Some(family));
    }

    #[test]
    fn test_broken_tail_joins_next_word() {
        let lines = wrap_label("abcdefg h", 50.0, &FONT, &measure);
        assert_eq!(lines, vec!["abcde", "fg h"]);
    }

    #[test]
    fn test_glyph_wider_than_limit_still_emitted() {
        let lines = wrap_label("xy", 5.0, &FONT, &measure);
        assert_eq!(lines, vec!["x", "y"]);
    }
}
