//! The diagram aggregate.
//!
//! A [`Diagram`] owns the ordered, de-duplicated element list, the ordered
//! connection list, the optional title and the [`Typography`] settings used
//! when the diagram is drawn.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::{
    draw::FontSpec,
    semantic::element::{Connection, Element},
};

/// Errors raised while mutating a [`Diagram`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    /// A connection referenced an element that has not been added.
    #[error("element `{name}` not found")]
    ElementNotFound { name: String },
}

/// Font configuration of a diagram.
///
/// Every role is optional; a missing font, or a missing font directory,
/// means the drawing surface's default font is used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Typography {
    font_dir: Option<PathBuf>,
    title_font: Option<FontSpec>,
    label_font: Option<FontSpec>,
    element_label_font: Option<FontSpec>,
}

impl Typography {
    /// Directory the font files are resolved against.
    pub fn font_dir(&self) -> Option<&Path> {
        self.font_dir.as_deref()
    }

    /// Font for the diagram title.
    pub fn title_font(&self) -> Option<&FontSpec> {
        self.title_font.as_ref()
    }

    /// Font for connection labels.
    pub fn label_font(&self) -> Option<&FontSpec> {
        self.label_font.as_ref()
    }

    /// Font for element names inside their boxes.
    pub fn element_label_font(&self) -> Option<&FontSpec> {
        self.element_label_font.as_ref()
    }
}

/// A parsed diagram: elements, connections, title and typography.
///
/// # Invariants
///
/// - Element names are unique; the first insertion of a name wins and its
///   position is kept.
/// - Every connection refers to elements present when it was added.
///
/// # Examples
///
/// ```
/// use zml_core::semantic::Diagram;
///
/// let mut diagram = Diagram::new();
/// diagram.add_elements(["A", "B", "A"]);
/// diagram.add_connection("A", "B", "hello", true).unwrap();
///
/// let names: Vec<_> = diagram.elements().map(|e| e.name()).collect();
/// assert_eq!(names, ["A", "B"]);
/// assert!(diagram.add_connection("A", "Z", "", false).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    elements: IndexMap<String, Element>,
    connections: Vec<Connection>,
    title: Option<String>,
    typography: Typography,
}

impl Diagram {
    /// Creates an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds elements by name, skipping names that already exist.
    pub fn add_elements<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if self.elements.contains_key(&name) {
                debug!(name; "Skipping existing element");
                continue;
            }

            debug!(name; "Adding element");
            self.elements.insert(name.clone(), Element::new(name));
        }
    }

    /// Appends a connection between two existing elements.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::ElementNotFound`] naming the first missing
    /// endpoint. The diagram is left unchanged in that case.
    pub fn add_connection(
        &mut self,
        from: &str,
        to: &str,
        label: &str,
        directional: bool,
    ) -> Result<(), DiagramError> {
        for name in [from, to] {
            if !self.elements.contains_key(name) {
                return Err(DiagramError::ElementNotFound {
                    name: name.to_string(),
                });
            }
        }

        debug!(from, to, label, directional; "Adding connection");
        self.connections
            .push(Connection::new(from, to, label, directional));
        Ok(())
    }

    /// Appends a connection drawn with an arrowhead.
    ///
    /// # Errors
    ///
    /// See [`Diagram::add_connection`].
    pub fn add_directional_connection(
        &mut self,
        from: &str,
        to: &str,
        label: &str,
    ) -> Result<(), DiagramError> {
        self.add_connection(from, to, label, true)
    }

    /// Appends a connection drawn without an arrowhead.
    ///
    /// # Errors
    ///
    /// See [`Diagram::add_connection`].
    pub fn add_plain_connection(
        &mut self,
        from: &str,
        to: &str,
        label: &str,
    ) -> Result<(), DiagramError> {
        self.add_connection(from, to, label, false)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        debug!(title; "Setting title");
        self.title = Some(title);
    }

    pub fn set_font_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        debug!(font_dir = dir.display().to_string(); "Setting font directory");
        self.typography.font_dir = Some(dir);
    }

    pub fn set_title_font(&mut self, font: FontSpec) {
        debug!(font = font.to_string(); "Setting title font");
        self.typography.title_font = Some(font);
    }

    pub fn set_label_font(&mut self, font: FontSpec) {
        debug!(font = font.to_string(); "Setting label font");
        self.typography.label_font = Some(font);
    }

    pub fn set_element_label_font(&mut self, font: FontSpec) {
        debug!(font = font.to_string(); "Setting element label font");
        self.typography.element_label_font = Some(font);
    }

    /// The title, if one was declared.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Elements in order of first appearance.
    pub fn elements(&self) -> impl ExactSizeIterator<Item = &Element> {
        self.elements.values()
    }

    /// Looks up an element by exact name.
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.get(name)
    }

    /// Connections in declaration order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn typography(&self) -> &Typography {
        &self.typography
    }
}
