//! SVG drawing surface.

use log::trace;
use svg::{self, node::element as svg_element};

use zml_core::{
    apply_stroke,
    color::Color,
    draw::{FontFace, StrokeDefinition, Surface, TextMeasurer},
    geometry::{Bounds, Point, Segment, Size},
};

/// A [`Surface`] that builds an SVG document.
///
/// Text is measured with the wrapped measurer so layout and output agree
/// on label sizes.
pub struct SvgSurface<'m, M: TextMeasurer> {
    size: Size,
    nodes: Vec<Box<dyn svg::Node>>,
    measurer: &'m M,
}

impl<'m, M: TextMeasurer> SvgSurface<'m, M> {
    /// Creates an empty document of the given pixel size.
    pub fn new(size: Size, measurer: &'m M) -> Self {
        Self {
            size,
            nodes: Vec::new(),
            measurer,
        }
    }

    /// Returns the serialized document.
    pub fn finish(self) -> String {
        let document = svg::Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set(
                "viewBox",
                format!("0 0 {} {}", self.size.width(), self.size.height()),
            )
            .set("width", self.size.width())
            .set("height", self.size.height());

        self.nodes
            .into_iter()
            .fold(document, |document, node| document.add(node))
            .to_string()
    }
}

impl<M: TextMeasurer> TextMeasurer for SvgSurface<'_, M> {
    fn measure_text(&self, text: &str, font: &FontFace) -> Size {
        self.measurer.measure_text(text, font)
    }
}

impl<M: TextMeasurer> Surface for SvgSurface<'_, M> {
    fn fill_rect(&mut self, bounds: Bounds, corner_radius: f32, fill: Color) {
        let mut rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", &fill);

        if corner_radius > 0.0 {
            rect = rect.set("rx", corner_radius).set("ry", corner_radius);
        }

        self.nodes.push(Box::new(rect));
    }

    fn stroke_line(&mut self, segment: Segment, stroke: &StrokeDefinition) {
        let line = svg_element::Line::new()
            .set("x1", segment.start().x())
            .set("y1", segment.start().y())
            .set("x2", segment.end().x())
            .set("y2", segment.end().y());
        let line = apply_stroke!(line, stroke);

        self.nodes.push(Box::new(line));
    }

    fn draw_text(&mut self, text: &str, baseline: Point, font: &FontFace, fill: Color) {
        trace!(text, x = baseline.x(), y = baseline.y(); "Drawing text");

        let node = svg_element::Text::new(xml_text(text))
            .set("x", baseline.x())
            .set("y", baseline.y())
            .set("font-family", font.family())
            .set("font-size", font.size())
            .set("fill", &fill);

        self.nodes.push(Box::new(node));
    }
}

/// Drops characters XML 1.0 does not allow in character data.
fn xml_text(text: &str) -> String {
    text.chars()
        .filter(|&c| match c {
            '\t' | '\n' | '\r' => true,
            '\u{FFFE}' | '\u{FFFF}' => false,
            c => c >= '\u{20}',
        })
        .collect()
}
