//! Text helpers for titles and outgoing messages.

use unicode_segmentation::UnicodeSegmentation;

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Length of `s` in UTF-16 code units, the unit Telegram counts in.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Cut `s` to at most `max_units` UTF-16 code units without splitting a
/// grapheme.
///
/// An ellipsis is appended when anything was removed.
pub fn truncate_graphemes(s: &str, max_units: usize) -> String {
    if utf16_len(s) <= max_units {
        return s.to_string();
    }
    if max_units == 0 {
        return String::new();
    }

    // One unit is reserved for the ellipsis.
    let budget = max_units - 1;
    let mut used = 0;
    let mut out = String::new();
    for grapheme in s.graphemes(true) {
        let len = utf16_len(grapheme);
        if used + len > budget {
            break;
        }
        used += len;
        out.push_str(grapheme);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("  Banks \n\t brace   for  rates "),
            "Banks brace for rates"
        );
    }

    #[test]
    fn test_truncate_short_unchanged() {
        assert_eq!(truncate_graphemes("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_graphemes("abcdefgh", 5), "abcd…");
    }

    #[test]
    fn test_truncate_keeps_graphemes_whole() {
        // "é" written as e + combining acute accent
        let s = "ae\u{301}e\u{301}e\u{301}";
        let out = truncate_graphemes(s, 4);
        assert_eq!(out, "ae\u{301}…");
        assert!(utf16_len(&out) <= 4);
    }

    #[test]
    fn test_truncate_counts_utf16_units() {
        // Each emoji is a surrogate pair
        assert_eq!(utf16_len("📰📰📰"), 6);
        assert_eq!(truncate_graphemes("📰📰📰", 5), "📰📰…");
        assert_eq!(truncate_graphemes("📰📰📰", 6), "📰📰📰");
    }

    #[test]
    fn test_truncate_to_zero_is_empty() {
        assert_eq!(truncate_graphemes("abc", 0), "");
    }
}
