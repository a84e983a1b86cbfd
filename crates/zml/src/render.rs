//! Render driver.
//!
//! Walks a [`Layout`] and issues drawing calls against a [`Surface`] in a
//! fixed order: background, title, each element (top box, its label,
//! lifeline, bottom box, its label), then each connection (line, arrowhead,
//! label).

use log::debug;

use zml_core::{
    color::Color,
    draw::{StrokeDefinition, Surface},
    geometry::Bounds,
};

use crate::layout::{ConnectionLayout, ElementLayout, Fonts, Layout};

/// Corner radius of element boxes.
pub const CORNER_RADIUS: f32 = 5.0;

/// Dash length of connection lines.
pub const DASH_LENGTH: f32 = 6.0;

/// Stroke width of lifelines, connections and arrowheads.
pub const LINE_WIDTH: f32 = 1.0;

/// Colors used when drawing a layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    background: Color,
    element_fill: Color,
    element_text: Color,
}

impl RenderStyle {
    pub fn new(background: Color, element_fill: Color, element_text: Color) -> Self {
        Self {
            background,
            element_fill,
            element_text,
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn element_fill(&self) -> Color {
        self.element_fill
    }

    pub fn element_text(&self) -> Color {
        self.element_text
    }

    /// Color of lines, arrowheads, the title and connection labels.
    pub fn line(&self) -> Color {
        Color::from_rgb8(0, 0, 0)
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::new(
            Color::resolve("white"),
            Color::resolve("platered"),
            Color::resolve("white"),
        )
    }
}

/// Draw `layout` onto `surface`.
pub fn render(layout: &Layout, style: &RenderStyle, surface: &mut impl Surface) {
    let canvas = Bounds::new_from_top_left(Default::default(), layout.canvas());
    surface.fill_rect(canvas, 0.0, style.background());

    let fonts = layout.fonts();
    if let Some(title) = layout.title() {
        surface.draw_text(title.text(), title.origin(), fonts.title(), style.line());
    }

    for element in layout.elements() {
        render_element(element, style, fonts, surface);
    }

    for connection in layout.connections() {
        render_connection(connection, style, fonts, surface);
    }

    debug!(
        elements = layout.elements().len(),
        connections = layout.connections().len();
        "Rendered layout"
    );
}

fn render_element(
    element: &ElementLayout,
    style: &RenderStyle,
    fonts: &Fonts,
    surface: &mut impl Surface,
) {
    let lifeline = StrokeDefinition::solid(style.line(), LINE_WIDTH);

    surface.fill_rect(element.top_box(), CORNER_RADIUS, style.element_fill());
    let label = element.top_label();
    surface.draw_text(label.text(), label.origin(), fonts.element(), style.element_text());

    surface.stroke_line(element.lifeline(), &lifeline);

    surface.fill_rect(element.bottom_box(), CORNER_RADIUS, style.element_fill());
    let label = element.bottom_label();
    surface.draw_text(label.text(), label.origin(), fonts.element(), style.element_text());
}

fn render_connection(
    connection: &ConnectionLayout,
    style: &RenderStyle,
    fonts: &Fonts,
    surface: &mut impl Surface,
) {
    let dashed = StrokeDefinition::dashed(style.line(), LINE_WIDTH, DASH_LENGTH);
    surface.stroke_line(connection.line(), &dashed);

    if let Some(arrowhead) = connection.arrowhead() {
        let solid = StrokeDefinition::solid(style.line(), LINE_WIDTH);
        for stroke in arrowhead {
            surface.stroke_line(*stroke, &solid);
        }
    }

    if let Some(label) = connection.label() {
        surface.draw_text(label.text(), label.origin(), fonts.label(), style.line());
    }
}

#[cfg(test)]
mod tests {
    use zml_core::{
        draw::{FontFace, StrokeStyle, TextMeasurer},
        geometry::{Point, Segment, Size},
        semantic::Diagram,
    };

    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Rect { bounds: Bounds, radius: f32, fill: Color },
        Line { segment: Segment, dashed: bool },
        Text { text: String, fill: Color },
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl TextMeasurer for RecordingSurface {
        fn measure_text(&self, text: &str, _font: &FontFace) -> Size {
            Size::new(text.len() as f32 * 7.0, 14.0)
        }
    }

    impl Surface for RecordingSurface {
        fn fill_rect(&mut self, bounds: Bounds, corner_radius: f32, fill: Color) {
            self.calls.push(Call::Rect {
                bounds,
                radius: corner_radius,
                fill,
            });
        }

        fn stroke_line(&mut self, segment: Segment, stroke: &StrokeDefinition) {
            self.calls.push(Call::Line {
                segment,
                dashed: matches!(stroke.style(), StrokeStyle::Dashed(_)),
            });
        }

        fn draw_text(&mut self, text: &str, _baseline: Point, _font: &FontFace, fill: Color) {
            self.calls.push(Call::Text {
                text: text.to_string(),
                fill,
            });
        }
    }

    fn render_source(diagram: &Diagram) -> Vec<Call> {
        let mut surface = RecordingSurface::default();
        let layout = Layout::compute(
            diagram,
            Size::new(600.0, 400.0),
            &surface,
            Fonts::default(),
        )
        .unwrap();
        render(&layout, &RenderStyle::default(), &mut surface);
        surface.calls
    }

    #[test]
    fn test_draw_order() {
        let mut diagram = Diagram::new();
        diagram.set_title("Flow");
        diagram.add_elements(["A", "B"]);
        diagram.add_directional_connection("A", "B", "go").unwrap();

        let calls = render_source(&diagram);
        let style = RenderStyle::default();
        let black = style.line();

        let kinds: Vec<&str> = calls
            .iter()
            .map(|call| match call {
                Call::Rect { .. } => "rect",
                Call::Line { dashed: true, .. } => "dashed",
                Call::Line { dashed: false, .. } => "line",
                Call::Text { .. } => "text",
            })
            .collect();
        assert_eq!(
            kinds,
            [
                "rect", "text", // background, title
                "rect", "text", "line", "rect", "text", // A
                "rect", "text", "line", "rect", "text", // B
                "dashed", "line", "line", "text", // A->B
            ]
        );

        assert_eq!(
            calls[0],
            Call::Rect {
                bounds: Bounds::new_from_top_left(Point::default(), Size::new(600.0, 400.0)),
                radius: 0.0,
                fill: style.background(),
            }
        );
        assert_eq!(
            calls[1],
            Call::Text {
                text: "Flow".to_string(),
                fill: black
            }
        );
        assert!(matches!(
            calls[2],
            Call::Rect { radius, fill, .. }
                if radius == CORNER_RADIUS && fill == style.element_fill()
        ));
        assert_eq!(
            calls[3],
            Call::Text {
                text: "A".to_string(),
                fill: style.element_text()
            }
        );
        assert_eq!(
            calls[15],
            Call::Text {
                text: "go".to_string(),
                fill: black
            }
        );
    }

    #[test]
    fn test_plain_connection_without_label() {
        let mut diagram = Diagram::new();
        diagram.add_elements(["A", "B"]);
        diagram.add_plain_connection("A", "B", "").unwrap();

        let calls = render_source(&diagram);
        // background + 2 * 5 element calls + the dashed line
        assert_eq!(calls.len(), 12);
        assert!(matches!(calls[11], Call::Line { dashed: true, .. }));
    }

    #[test]
    fn test_empty_diagram_draws_only_background() {
        let calls = render_source(&Diagram::new());
        assert_eq!(calls.len(), 1);
    }

    #[test]
    fn test_default_style() {
        let style = RenderStyle::default();
        assert_eq!(style.background().rgb8(), (255, 255, 255));
        assert_eq!(style.element_fill().rgb8(), (255, 80, 80));
        assert_eq!(style.element_text().rgb8(), (255, 255, 255));
        assert_eq!(style.line().rgb8(), (0, 0, 0));
    }
}
