//! Error and diagnostic system for the ZML parser.
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with an optional code, labeled source
//! locations, and help text. Fatal diagnostics are wrapped in [`ParseError`];
//! advisory ones travel alongside the parsed document.
//!
//! # Example
//!
//! ```
//! # use zml_parser::error::{Diagnostic, ErrorCode};
//! # use zml_parser::Span;
//!
//! let diag = Diagnostic::warning("line does not describe a relation")
//!     .with_code(ErrorCode::W100)
//!     .with_label(Span::new(12..20), "ignored")
//!     .with_help("relations look like `Alice->Bob: hello`");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
