//! Diagram elements and the connections between them.

use std::fmt;

/// The shape an element is drawn with.
///
/// Only [`ElementKind::Rectangle`] is produced by the parser and drawn by the
/// render driver.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    #[default]
    Rectangle,
    Decision,
    Circle,
}

/// A named participant of the diagram.
///
/// The name is the identity: two elements with the same name are the same
/// element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    kind: ElementKind,
}

impl Element {
    /// Creates a rectangle element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ElementKind::default(),
        }
    }

    /// Returns the element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the element kind.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A relation between two elements, drawn as one row of the diagram.
///
/// Endpoints are referenced by name. Connections have no identity of their
/// own; the same pair may be connected any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    from: String,
    to: String,
    directional: bool,
    label: String,
}

impl Connection {
    pub(crate) fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
        directional: bool,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            directional,
            label: label.into(),
        }
    }

    /// Name of the source element.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Name of the target element.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Whether the connection is drawn with an arrowhead at the target.
    pub fn is_directional(&self) -> bool {
        self.directional
    }

    /// The label, empty when the connection has none.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.directional { "->" } else { "--" };
        write!(f, "{}{arrow}{}", self.from, self.to)?;
        if !self.label.is_empty() {
            write!(f, ": {}", self.label)?;
        }
        Ok(())
    }
}
