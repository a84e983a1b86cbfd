//! Drawing definitions and the drawing-surface abstraction.
//!
//! The render driver never talks to a concrete graphics backend. It issues
//! calls against a [`Surface`], which combines a handful of raster-style
//! primitives with [`TextMeasurer`]. Backends (such as the SVG surface in the
//! `zml` crate) implement these traits; tests can use recording fakes.
//!
//! # Overview
//!
//! - [`Surface`] - Fill, stroke and text primitives
//! - [`StrokeDefinition`] / [`StrokeStyle`] - Line styling
//! - [`FontSpec`] / [`FontFace`] / [`TextManager`] - Fonts and measurement

mod stroke;
mod text;

pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, FontFace, FontSpec, FontSpecError, TextManager,
    TextMeasurer,
};

use crate::{
    color::Color,
    geometry::{Bounds, Point, Segment},
};

/// A 2D drawing target.
///
/// All coordinates are in canvas pixels with the origin at the top-left
/// corner.
pub trait Surface: TextMeasurer {
    /// Fills a rectangle, rounding its corners by `corner_radius`.
    fn fill_rect(&mut self, bounds: Bounds, corner_radius: f32, fill: Color);

    /// Strokes a straight line.
    fn stroke_line(&mut self, segment: Segment, stroke: &StrokeDefinition);

    /// Draws a single line of text with its left baseline at `baseline`.
    fn draw_text(&mut self, text: &str, baseline: Point, font: &FontFace, fill: Color);
}
