//! Elaboration: applying parsed declarations to a [`Diagram`].

use log::{debug, info};

use zml_core::semantic::{Diagram, DiagramError};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    parser::Document,
    span::Span,
};

/// Builds a [`Diagram`] from a parsed [`Document`].
///
/// Declarations are applied in source order: both element names are added
/// first, then the connection. The title, when present, is set last.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying an [`ErrorCode::E200`] diagnostic if a
/// connection refers to an element the diagram does not contain.
pub fn elaborate(document: &Document) -> Result<Diagram, ParseError> {
    let mut diagram = Diagram::new();

    for decl in document.declarations() {
        let span = decl.span();
        let decl = decl.inner();

        diagram.add_elements([decl.from(), decl.to()]);
        diagram
            .add_connection(decl.from(), decl.to(), decl.label(), decl.is_directional())
            .map_err(|err| element_not_found(err, span))?;
    }

    if let Some(title) = document.title() {
        diagram.set_title(title);
    }

    info!(
        elements = diagram.elements().len(),
        connections = diagram.connections().len();
        "Diagram elaborated"
    );

    Ok(diagram)
}

fn element_not_found(err: DiagramError, span: Span) -> ParseError {
    debug!(err:err; "Connection endpoint missing");
    match err {
        DiagramError::ElementNotFound { name } => {
            Diagnostic::error(format!("element `{name}` not found"))
                .with_code(ErrorCode::E200)
                .with_label(span, "referenced here")
                .into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;

    #[test]
    fn test_elaborate_end_to_end() {
        let document = parse_document("title: Demo\nA->B: go\nB--C");
        let diagram = elaborate(&document).unwrap();

        assert_eq!(diagram.title(), Some("Demo"));

        let names: Vec<_> = diagram.elements().map(|e| e.name()).collect();
        assert_eq!(names, ["A", "B", "C"]);

        let connections = diagram.connections();
        assert_eq!(connections.len(), 2);
        assert_eq!(connections[0].to_string(), "A->B: go");
        assert_eq!(connections[1].to_string(), "B--C");
    }

    #[test]
    fn test_elaborate_empty_document() {
        let diagram = elaborate(&parse_document("")).unwrap();
        assert!(diagram.title().is_none());
        assert_eq!(diagram.elements().len(), 0);
        assert!(diagram.connections().is_empty());
    }

    #[test]
    fn test_element_not_found_diagnostic() {
        let err = element_not_found(
            DiagramError::ElementNotFound {
                name: "Bob".to_string(),
            },
            Span::new(3..9),
        );

        let diag = &err.diagnostics()[0];
        assert!(diag.severity().is_error());
        assert_eq!(diag.code(), Some(ErrorCode::E200));
        assert_eq!(diag.message(), "element `Bob` not found");
        assert_eq!(diag.labels()[0].span(), Span::new(3..9));
    }
}
