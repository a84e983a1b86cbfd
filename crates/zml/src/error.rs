//! Error types for ZML operations.

use std::io;

use thiserror::Error;

use zml_core::draw::FontSpecError;
use zml_parser::error::ParseError;

use crate::{export, layout::LayoutError};

/// The main error type for ZML operations.
///
/// The `Parse` variant keeps the source text next to the diagnostics so
/// callers can render them with context.
#[derive(Debug, Error)]
pub enum ZmlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}

impl ZmlError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

impl From<FontSpecError> for ZmlError {
    fn from(err: FontSpecError) -> Self {
        Self::Config(format!("invalid font: {err}"))
    }
}
