//! Diagnostics with source location tracking.
//!
//! Every fallible operation in `modulon` returns a [`Diagnostic`] on failure,
//! never an out-of-band exception. Diagnostics are plain values: a stable
//! error code (`"E0801"`), a human-readable message, and the [`Location`]
//! the problem was found at.
//!
//! # Example
//!
//! ```
//! use modulon_base::{Diagnostic, Location};
//!
//! let err = Diagnostic::new("E0802", "unresolved local type 'Foo'", Location::new(0, 12));
//! assert!(err.to_string().contains("E0802"));
//! ```

use crate::location::Location;
use std::fmt;

/// A single diagnostic: error code, message, and source location.
///
/// Implements [`std::error::Error`] and [`fmt::Display`]. The display format
/// is `"{code}: {message} ({source_id}:{line})"`.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Stable error code, e.g. `"E0101"`.
    pub code: &'static str,
    /// Human-readable description.
    pub message: String,
    /// Where in the source this was raised.
    pub location: Location,
}

impl Diagnostic {
    /// Creates a diagnostic with the given code, message, and location.
    pub fn new(code: &'static str, message: impl Into<String>, location: Location) -> Self {
        Self {
            code,
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}:{})",
            self.code, self.message, self.location.source_id, self.location.line
        )
    }
}

impl std::error::Error for Diagnostic {}

/// Alias for `std::result::Result<T, Diagnostic>`.
///
/// Use this as the return type for every fallible operation in `modulon`.
pub type Result<T> = std::result::Result<T, Diagnostic>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_display_includes_code_and_location() {
        let err = Diagnostic::new("E0104", "empty char literal", Location::new(3, 7));
        let display = format!("{}", err);
        assert!(display.contains("E0104"));
        assert!(display.contains("empty char literal"));
        assert!(display.contains("3:7"));
    }
}
