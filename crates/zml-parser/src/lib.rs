//! # ZML Parser
//!
//! Parser for the ZML sequence diagram markup. This crate turns source text
//! into a [`zml_core::semantic::Diagram`].
//!
//! The pipeline has two steps:
//!
//! 1. **Parse** ([`parse`]) - Split the source into lines, extract the title
//!    and the relation declarations. Never fails; unrecognized lines become
//!    warnings.
//! 2. **Elaborate** ([`elaborate`]) - Apply the declarations to a diagram in
//!    source order.
//!
//! ## Usage
//!
//! ```
//! # use zml_parser::{build_diagram, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = "title: Checkout\nUser->Shop: order\nShop->Bank: charge";
//!
//!     let output = build_diagram(source)?;
//!     assert_eq!(output.diagram.title(), Some("Checkout"));
//!     assert_eq!(output.diagram.elements().len(), 3);
//!     assert!(output.warnings.is_empty());
//!     Ok(())
//! }
//! ```

pub mod error;

mod elaborate;
mod parser;
mod span;

pub use elaborate::elaborate;
pub use parser::{Document, RelationDecl};
pub use span::{Span, Spanned};

use log::info;

use zml_core::semantic::Diagram;

use error::{Diagnostic, ParseError};

/// A diagram together with the warnings collected while parsing it.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub diagram: Diagram,
    pub warnings: Vec<Diagnostic>,
}

/// Parse ZML source into a [`Document`].
///
/// # Example
///
/// ```
/// let document = zml_parser::parse("A-->B: hi\nnot a relation");
/// assert_eq!(document.declarations().len(), 1);
/// assert_eq!(document.warnings().len(), 1);
/// ```
pub fn parse(source: &str) -> Document {
    info!(bytes = source.len(); "Parsing document");
    parser::parse_document(source)
}

/// Parse and elaborate ZML source in one step.
///
/// # Errors
///
/// Returns a [`ParseError`] when elaboration fails. Skipped lines are not
/// errors; they are returned in [`ParseOutput::warnings`].
pub fn build_diagram(source: &str) -> Result<ParseOutput, ParseError> {
    let document = parse(source);
    let diagram = elaborate(&document)?;

    Ok(ParseOutput {
        diagram,
        warnings: document.into_warnings(),
    })
}
