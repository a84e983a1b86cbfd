//! Semantic diagram model types.
//!
//! This module contains the representation of a diagram after the source text
//! has been parsed and every declaration has been applied. The model is plain
//! data: it owns no drawing state and knows nothing about coordinates.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parse
//! Declarations (zml_parser::Document)
//!     ↓ elaborate
//! Semantic Model (these types)
//!     ↓ layout
//! Geometry (zml::layout::Layout)
//!     ↓ render
//! PNG
//! ```
//!
//! # Organization
//!
//! - [`diagram`] - The [`Diagram`] aggregate and its [`Typography`] settings
//! - [`element`] - [`Element`], [`ElementKind`] and [`Connection`]

pub mod diagram;
pub mod element;

pub use diagram::*;
pub use element::*;
