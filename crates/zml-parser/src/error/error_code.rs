//! Diagnostic codes.
//!
//! - `W1xx` - Parser warnings
//! - `E2xx` - Elaboration errors

use std::fmt;

/// Codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Unrecognized line.
    ///
    /// A non-blank, non-comment line matched neither the title nor the
    /// relation syntax and was skipped.
    W100,

    /// Undefined element.
    ///
    /// A connection referenced an element that is not part of the diagram.
    E200,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E200").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::W100 => "W100",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::W100 => "unrecognized line",
            ErrorCode::E200 => "undefined element",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
