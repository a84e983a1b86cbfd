//! The core diagnostic type.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! code, labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// warning[W100]: line does not describe a relation
///   --> diagram.zml:3:1
///    |
///  3 | Alice => Bob
///    | ^^^^^^^^^^^^ ignored
///    |
///    = help: relations look like `Alice->Bob: hello`
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use zml_parser::error::{Diagnostic, ErrorCode};
    /// # use zml_parser::Span;
    /// let diag = Diagnostic::error("element `Bob` not found")
    ///     .with_code(ErrorCode::E200)
    ///     .with_label(Span::new(0..8), "referenced here");
    /// assert_eq!(diag.to_string(), "error[E200]: element `Bob` not found");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E200]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_defaults() {
        let diag = Diagnostic::error("test error");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::warning("line does not describe a relation")
            .with_code(ErrorCode::W100)
            .with_label(Span::new(6..18), "ignored")
            .with_secondary_label(Span::new(0..5), "title")
            .with_help("relations look like `Alice->Bob: hello`");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::W100));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(diag.help(), Some("relations look like `Alice->Bob: hello`"));
    }

    #[test]
    fn test_diagnostic_display() {
        let with_code = Diagnostic::error("element `X` not found").with_code(ErrorCode::E200);
        assert_eq!(with_code.to_string(), "error[E200]: element `X` not found");

        let without_code = Diagnostic::warning("skipped");
        assert_eq!(without_code.to_string(), "warning: skipped");
    }
}
