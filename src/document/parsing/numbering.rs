//! Section numbering
//!
//! Stateful per-level counters that generate the hierarchical numbering
//! prefix for section titles ("1", "1.2", "1.2.3"), plus detection of
//! headings whose text already carries a manual numeric prefix.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

// Leading numeric-dotted prefix typed by the document author: "2.1 Scope",
// "3. Background", "4.1.2  Details".
static NUMBERED_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+(\.\d+)*\.?\s*").unwrap());

/// Per-level heading counters for one document.
///
/// Keys are heading levels (1 = top). A `BTreeMap` keeps levels ordered so
/// the numbering string joins counters in ascending level order.
#[derive(Debug, Default)]
pub(crate) struct SectionCounters {
    counters: BTreeMap<u8, u32>,
}

impl SectionCounters {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a heading at `level` and return its numbering string.
    ///
    /// Increments the counter for `level`, zeroes every deeper counter (a
    /// level-2 heading resets level-3+ counters accumulated under a previous
    /// level-2 sibling), then joins the non-zero counters for levels up to
    /// and including `level` with dots.
    pub(crate) fn advance(&mut self, level: u8) -> String {
        *self.counters.entry(level).or_insert(0) += 1;

        let deeper = (std::ops::Bound::Excluded(level), std::ops::Bound::Unbounded);
        for (_, counter) in self.counters.range_mut::<u8, _>(deeper) {
            *counter = 0;
        }

        self.counters
            .range(..=level)
            .filter(|(_, counter)| **counter > 0)
            .map(|(_, counter)| counter.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Whether heading text already starts with a manual numeric prefix, in
/// which case the generated numbering must not be prepended.
pub(crate) fn has_manual_numbering(text: &str) -> bool {
    NUMBERED_TITLE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_numbering() {
        let mut counters = SectionCounters::new();
        assert_eq!(counters.advance(1), "1");
        assert_eq!(counters.advance(2), "1.1");
        assert_eq!(counters.advance(2), "1.2");
        assert_eq!(counters.advance(3), "1.2.1");
        assert_eq!(counters.advance(1), "2");
        assert_eq!(counters.advance(2), "2.1");
    }

    #[test]
    fn test_deeper_levels_reset_on_shallower_heading() {
        let mut counters = SectionCounters::new();
        counters.advance(1);
        counters.advance(2);
        counters.advance(3);
        // A new level-2 sibling resets the level-3 counter
        assert_eq!(counters.advance(2), "1.2");
        assert_eq!(counters.advance(3), "1.2.1");
    }

    #[test]
    fn test_document_starting_below_level_one() {
        // A document whose first heading is level 3 gets "1", not "0.0.1"
        let mut counters = SectionCounters::new();
        assert_eq!(counters.advance(3), "1");
        assert_eq!(counters.advance(3), "2");
        assert_eq!(counters.advance(1), "1");
    }

    #[test]
    fn test_manual_numbering_detection() {
        assert!(has_manual_numbering("3.1 Background"));
        assert!(has_manual_numbering("2. Introduction"));
        assert!(has_manual_numbering("  4.2.1 Details"));
        assert!(has_manual_numbering("2021 Annual Report"));
        assert!(!has_manual_numbering("Introduction"));
        assert!(!has_manual_numbering("Scope 2"));
        assert!(!has_manual_numbering(""));
    }
}
