//! Heading classification
//!
//! Maps a paragraph's style name to an integer heading level. Word names
//! heading styles "Heading 1", "Heading 2", ...; exported documents and
//! third-party writers produce variants like "Heading1" or "Heading #3",
//! so the trailing-token parse falls back to the first integer found
//! anywhere in the style name.

use once_cell::sync::Lazy;
use regex::Regex;

static STYLE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Classify a style name as a heading level, or `None` for body styles.
///
/// Classification failures (missing digits, malformed names) are "not a
/// heading", never an error.
pub(crate) fn classify_heading(style_name: &str) -> Option<u8> {
    if !style_name.starts_with("Heading") {
        return None;
    }

    // Well-formed names carry the level as the trailing token.
    if let Some(tail) = style_name.split_whitespace().last() {
        if let Ok(level) = tail.parse::<u8>() {
            if level > 0 {
                return Some(level);
            }
        }
    }

    // Ill-formatted heading styles: take the first integer anywhere.
    STYLE_DIGITS
        .find(style_name)
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .filter(|level| *level > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_heading_styles() {
        assert_eq!(classify_heading("Heading 1"), Some(1));
        assert_eq!(classify_heading("Heading 2"), Some(2));
        assert_eq!(classify_heading("Heading 6"), Some(6));
    }

    #[test]
    fn test_ill_formatted_heading_styles() {
        // Style ids as written into the XML carry no space
        assert_eq!(classify_heading("Heading1"), Some(1));
        assert_eq!(classify_heading("Heading3"), Some(3));
        // Digits buried mid-name
        assert_eq!(classify_heading("Heading #2 Custom"), Some(2));
    }

    #[test]
    fn test_non_heading_styles() {
        assert_eq!(classify_heading("Normal"), None);
        assert_eq!(classify_heading("Title"), None);
        assert_eq!(classify_heading("Body Text 2"), None);
        // Must begin with the literal word
        assert_eq!(classify_heading("My Heading 1"), None);
    }

    #[test]
    fn test_heading_style_without_digits() {
        assert_eq!(classify_heading("Heading"), None);
        assert_eq!(classify_heading("Heading Custom"), None);
    }

    #[test]
    fn test_zero_level_rejected() {
        assert_eq!(classify_heading("Heading 0"), None);
    }
}
