//! Stroke and line-style definitions.
//!
//! Every line the render driver hands to a [`Surface`](crate::draw::Surface)
//! carries a [`StrokeDefinition`]: color, width and dash pattern.
//!
//! # Quick Start
//!
//! ```
//! use zml_core::draw::{StrokeDefinition, StrokeStyle};
//! use zml_core::color::Color;
//!
//! // Lifelines and arrowheads
//! let solid = StrokeDefinition::solid(Color::default(), 1.0);
//! assert_eq!(solid.style(), &StrokeStyle::Solid);
//!
//! // Connection lines
//! let dashed = StrokeDefinition::dashed(Color::default(), 1.0, 6.0);
//! assert_eq!(dashed.style().to_svg_value().as_deref(), Some("6"));
//! ```
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke` | `"#000000"` |
//! | `width` | `stroke-width` | `1.0` |
//! | `style` | `stroke-dasharray` | `"6"` |

use crate::color::Color;

/// Line pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// Equal dash and gap lengths.
    Dashed(f32),
}

impl StrokeStyle {
    /// Returns the `stroke-dasharray` value, or `None` for solid lines.
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed(length) => Some(length.to_string()),
        }
    }
}

/// Complete stroke configuration for a line.
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a dashed stroke with equal dash and gap `dash` lengths.
    pub fn dashed(color: Color, width: f32, dash: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Dashed(dash),
        }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// # Examples
///
/// ```
/// use zml_core::draw::StrokeDefinition;
/// use zml_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::dashed(Color::default(), 1.0, 6.0);
/// let line = svg_element::Line::new()
///     .set("x1", 0)
///     .set("y1", 0)
///     .set("x2", 100)
///     .set("y2", 0);
///
/// let line = zml_core::apply_stroke!(line, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_style_svg_value() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(StrokeStyle::Dashed(6.0).to_svg_value().as_deref(), Some("6"));
        assert_eq!(
            StrokeStyle::Dashed(2.5).to_svg_value().as_deref(),
            Some("2.5")
        );
    }

    #[test]
    fn test_stroke_constructors() {
        let red = Color::resolve("red");
        let solid = StrokeDefinition::solid(red, 2.0);
        assert_eq!(solid.color(), red);
        assert_eq!(solid.width(), 2.0);
        assert_eq!(solid.style(), &StrokeStyle::Solid);

        let dashed = StrokeDefinition::dashed(red, 1.0, 6.0);
        assert_eq!(dashed.style(), &StrokeStyle::Dashed(6.0));
    }

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.color(), Color::default());
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.style(), &StrokeStyle::Solid);
    }
}
