//! Source location tracking for diagnostics.
//!
//! A [`Location`] pairs a source id (assigned by [`crate::SourceRegistry`])
//! with a 1-based line number. Every token and AST node carries one.
//! Locations are created at scan time and never mutated afterwards.
//!
//! Unlike a byte-offset [`Span`](https://docs.rs/logicaffeine-base), a
//! `Location` only tracks the line: the scanner reports diagnostics at line
//! granularity, matching the original tokenizer this crate generalizes.

/// Sentinel source id meaning "no source", used by [`Location::default`].
pub const UNKNOWN_SOURCE: u32 = u32::MAX;

/// A `(source_id, line)` pair identifying a position in a registered source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Id assigned by [`crate::SourceRegistry::add`].
    pub source_id: u32,
    /// 1-based line number within that source.
    pub line: u32,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            source_id: UNKNOWN_SOURCE,
            line: 0,
        }
    }
}

impl Location {
    /// Creates a location from a source id and line number.
    ///
    /// No validation is performed; `source_id` may not correspond to any
    /// registered source.
    pub fn new(source_id: u32, line: u32) -> Self {
        Self { source_id, line }
    }

    /// Returns `true` if this location was never assigned a real source.
    pub fn is_unknown(&self) -> bool {
        self.source_id == UNKNOWN_SOURCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_new_stores_fields() {
        let loc = Location::new(2, 10);
        assert_eq!(loc.source_id, 2);
        assert_eq!(loc.line, 10);
    }

    #[test]
    fn location_default_is_unknown() {
        let loc = Location::default();
        assert!(loc.is_unknown());
    }

    #[test]
    fn location_with_real_source_is_not_unknown() {
        let loc = Location::new(0, 1);
        assert!(!loc.is_unknown());
    }
}
