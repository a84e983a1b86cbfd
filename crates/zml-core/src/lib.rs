//! ZML Core Types and Definitions
//!
//! This crate provides the foundational types for the ZML diagram language.
//! It includes:
//!
//! - **Colors**: Color tokens resolved to RGB ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Strokes, fonts and the drawing surface ([`draw`] module)
//! - **Semantic**: The diagram model ([`semantic`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod semantic;
