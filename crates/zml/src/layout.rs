//! Layout engine for sequence diagrams.
//!
//! Assigns canvas coordinates to every part of a [`Diagram`]: the title,
//! each element's two boxes and the lifeline between them, and each
//! connection's line, arrowhead and label.
//!
//! The computation is a single deterministic pass. Text is measured through
//! a [`TextMeasurer`], so the geometry can be tested without fonts.
//!
//! ```text
//!            slot            slot            slot
//!     ├───────────────┼───────────────┼───────────────┤
//!        ┌────────┐      ┌────────┐      ┌────────┐      10% of height
//!        │   A    │      │   B    │      │   C    │
//!        └───┬────┘      └───┬────┘      └───┬────┘
//!            ├- - - - - - - >│                 │          row 1
//!            │               ├- - - - - - - - -┤          row 2
//!            │               │                 │          (one spare row)
//!        ┌───┴────┐      ┌───┴────┐      ┌───┴────┐
//!        │   A    │      │   B    │      │   C    │
//!        └────────┘      └────────┘      └────────┘
//! ```

use indexmap::IndexMap;
use log::{debug, info, warn};
use thiserror::Error;

use zml_core::{
    draw::{FontFace, TextManager, TextMeasurer},
    geometry::{Bounds, Point, Segment, Size},
    semantic::{Connection, Diagram, Typography},
};

/// Width of an element box.
pub const BOX_WIDTH: f32 = 100.0;

/// Height of an element box.
pub const BOX_HEIGHT: f32 = 50.0;

/// Horizontal shift applied to each element slot; labels sit half of it
/// away from the lifeline.
pub const PADDING: f32 = 32.0;

/// Vertical distance between connection rows.
pub const ROW_HEIGHT: f32 = 50.0;

/// Half of the box outline stroke, used to align lines on the pixel grid.
pub const STROKE_OFFSET: f32 = 2.5;

/// Horizontal length of an arrowhead stroke.
pub const ARROW_LENGTH: f32 = 10.0;

/// Vertical spread of an arrowhead stroke above and below the line.
pub const ARROW_SPREAD: f32 = 10.0;

/// Gap between a connection line and its label.
pub const LABEL_GAP: f32 = 5.0;

/// Vertical position of the title baseline as a fraction of canvas height.
const TITLE_Y_RATIO: f32 = 0.05;

/// Vertical position of the top boxes as a fraction of canvas height.
const ELEMENT_Y_RATIO: f32 = 0.1;

/// Errors raised while computing a layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("connection references element `{name}` which has no position")]
    MissingElement { name: String },
}

/// Resolved fonts for each text role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fonts {
    title: FontFace,
    element: FontFace,
    label: FontFace,
}

impl Fonts {
    pub fn new(title: FontFace, element: FontFace, label: FontFace) -> Self {
        Self {
            title,
            element,
            label,
        }
    }

    /// Load the fonts named by a diagram's typography.
    ///
    /// Roles without a font, and fonts that fail to load, use the default
    /// face.
    pub fn resolve(typography: &Typography, manager: &TextManager) -> Self {
        let dir = typography.font_dir();
        Self {
            title: manager.resolve_font(dir, typography.title_font()),
            element: manager.resolve_font(dir, typography.element_label_font()),
            label: manager.resolve_font(dir, typography.label_font()),
        }
    }

    pub fn title(&self) -> &FontFace {
        &self.title
    }

    pub fn element(&self) -> &FontFace {
        &self.element
    }

    pub fn label(&self) -> &FontFace {
        &self.label
    }

    /// Font files backing these faces, without duplicates.
    pub fn sources(&self) -> Vec<&std::path::Path> {
        let mut sources = Vec::new();
        for source in [&self.title, &self.element, &self.label]
            .into_iter()
            .filter_map(FontFace::source)
        {
            if !sources.contains(&source) {
                sources.push(source);
            }
        }
        sources
    }
}

/// A single line of text positioned by its left baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    text: String,
    origin: Point,
    size: Size,
}

impl TextPlacement {
    fn new(text: impl Into<String>, origin: Point, size: Size) -> Self {
        Self {
            text: text.into(),
            origin,
            size,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Left end of the baseline.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Measured width and line height.
    pub fn size(&self) -> Size {
        self.size
    }
}

/// Geometry of one element: two boxes joined by a lifeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementLayout {
    top_box: Bounds,
    top_label: TextPlacement,
    lifeline: Segment,
    bottom_box: Bounds,
    bottom_label: TextPlacement,
}

impl ElementLayout {
    fn new(name: &str, anchor: Point, lifeline_length: f32, label_size: Size) -> Self {
        let box_size = Size::new(BOX_WIDTH, BOX_HEIGHT);
        let top_box = Bounds::new_from_top_left(anchor, box_size);

        let lifeline_x = anchor.x() + BOX_WIDTH / 2.0 - STROKE_OFFSET;
        let lifeline_start = top_box.max_y() + STROKE_OFFSET;
        let lifeline_end = lifeline_start + lifeline_length;
        let lifeline = Segment::new(
            Point::new(lifeline_x, lifeline_start),
            Point::new(lifeline_x, lifeline_end),
        );

        let bottom_box =
            Bounds::new_from_top_left(Point::new(anchor.x(), lifeline_end + 1.0), box_size);

        Self {
            top_box,
            top_label: centered_label(name, top_box, label_size),
            lifeline,
            bottom_box,
            bottom_label: centered_label(name, bottom_box, label_size),
        }
    }

    /// Top-left corner of the top box.
    pub fn anchor(&self) -> Point {
        self.top_box.min_point()
    }

    pub fn top_box(&self) -> Bounds {
        self.top_box
    }

    pub fn top_label(&self) -> &TextPlacement {
        &self.top_label
    }

    pub fn lifeline(&self) -> Segment {
        self.lifeline
    }

    pub fn bottom_box(&self) -> Bounds {
        self.bottom_box
    }

    pub fn bottom_label(&self) -> &TextPlacement {
        &self.bottom_label
    }
}

fn centered_label(name: &str, bounds: Bounds, size: Size) -> TextPlacement {
    let origin = Point::new(
        bounds.min_x() + bounds.width() / 2.0 - size.width() / 2.0,
        bounds.min_y() + bounds.height() / 2.0 + size.height() / 2.0,
    );
    TextPlacement::new(name, origin, size)
}

/// Geometry of one connection row.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionLayout {
    line: Segment,
    arrowhead: Option<[Segment; 2]>,
    label: Option<TextPlacement>,
    reverse: bool,
}

impl ConnectionLayout {
    /// The horizontal line from the source lifeline to the target lifeline.
    pub fn line(&self) -> Segment {
        self.line
    }

    /// Two strokes meeting at the target end, for directional connections.
    pub fn arrowhead(&self) -> Option<&[Segment; 2]> {
        self.arrowhead.as_ref()
    }

    pub fn label(&self) -> Option<&TextPlacement> {
        self.label.as_ref()
    }

    /// `true` when the target lies left of the source.
    pub fn is_reverse(&self) -> bool {
        self.reverse
    }
}

/// The complete geometry of a diagram on a canvas.
#[derive(Debug, Clone)]
pub struct Layout {
    canvas: Size,
    fonts: Fonts,
    title: Option<TextPlacement>,
    elements: IndexMap<String, ElementLayout>,
    connections: Vec<ConnectionLayout>,
}

impl Layout {
    /// Compute the layout of `diagram` on a canvas of the given size.
    ///
    /// Elements get one horizontal slot each, in order. Connection `i` is
    /// drawn on row `i + 1` below the top boxes.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::MissingElement`] if a connection names an
    /// element that was not laid out.
    pub fn compute(
        diagram: &Diagram,
        canvas: Size,
        measurer: &impl TextMeasurer,
        fonts: Fonts,
    ) -> Result<Self, LayoutError> {
        let title = diagram
            .title()
            .filter(|title| !title.is_empty())
            .map(|title| {
                let size = measurer.measure_text(title, fonts.title());
                let origin = Point::new(
                    canvas.width() / 2.0 - size.width() / 2.0,
                    canvas.height() * TITLE_Y_RATIO,
                );
                TextPlacement::new(title, origin, size)
            });

        let elements = layout_elements(diagram, canvas, measurer, fonts.element());
        let connections = diagram
            .connections()
            .iter()
            .enumerate()
            .map(|(index, connection)| {
                layout_connection(index, connection, &elements, measurer, fonts.label())
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            elements = elements.len(),
            connections = connections.len();
            "Layout computed"
        );

        Ok(Self {
            canvas,
            fonts,
            title,
            elements,
            connections,
        })
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn fonts(&self) -> &Fonts {
        &self.fonts
    }

    pub fn title(&self) -> Option<&TextPlacement> {
        self.title.as_ref()
    }

    /// Element layouts in render order.
    pub fn elements(&self) -> impl ExactSizeIterator<Item = &ElementLayout> {
        self.elements.values()
    }

    pub fn element(&self, name: &str) -> Option<&ElementLayout> {
        self.elements.get(name)
    }

    /// Connection layouts in declaration order.
    pub fn connections(&self) -> &[ConnectionLayout] {
        &self.connections
    }
}

fn layout_elements(
    diagram: &Diagram,
    canvas: Size,
    measurer: &impl TextMeasurer,
    font: &FontFace,
) -> IndexMap<String, ElementLayout> {
    let mut placed = IndexMap::new();

    let count = diagram.elements().len();
    if count == 0 {
        return placed;
    }

    let slot = (canvas.width() / count as f32).floor();
    let top = canvas.height() * ELEMENT_Y_RATIO;
    // One row per connection plus a spare one below the last.
    let lifeline_length = diagram.connections().len() as f32 * ROW_HEIGHT + ROW_HEIGHT;

    for element in diagram.elements() {
        let name = element.name();
        // `Diagram` keeps names unique; a repeat from any other source is
        // skipped so the remaining elements are still placed.
        if placed.contains_key(name) {
            warn!(name; "Element already laid out, skipping");
            continue;
        }

        let index = placed.len() as f32;
        let start_x = slot * (index + 1.0) - slot / 2.0 - PADDING;
        let label_size = measurer.measure_text(name, font);
        let anchor = Point::new(start_x, top);
        let layout = ElementLayout::new(name, anchor, lifeline_length, label_size);

        debug!(name, x = start_x, y = top; "Placed element");
        placed.insert(name.to_string(), layout);
    }

    placed
}

fn layout_connection(
    index: usize,
    connection: &Connection,
    elements: &IndexMap<String, ElementLayout>,
    measurer: &impl TextMeasurer,
    font: &FontFace,
) -> Result<ConnectionLayout, LayoutError> {
    let anchor = |name: &str| {
        elements
            .get(name)
            .map(ElementLayout::anchor)
            .ok_or_else(|| LayoutError::MissingElement {
                name: name.to_string(),
            })
    };
    let from = anchor(connection.from())?;
    let to = anchor(connection.to())?;

    let start_x = from.x() + BOX_WIDTH / 2.0 - STROKE_OFFSET;
    let end_x = to.x() + BOX_WIDTH / 2.0 - STROKE_OFFSET;
    let y = from.y() + BOX_HEIGHT + STROKE_OFFSET + (index + 1) as f32 * ROW_HEIGHT;
    let reverse = end_x < start_x;

    let line = Segment::new(Point::new(start_x, y), Point::new(end_x, y));

    let arrowhead = connection.is_directional().then(|| {
        let tip = Point::new(end_x, y);
        let back_x = if reverse {
            end_x + ARROW_LENGTH
        } else {
            end_x - ARROW_LENGTH
        };
        [
            Segment::new(tip, Point::new(back_x, y - ARROW_SPREAD)),
            Segment::new(tip, Point::new(back_x, y + ARROW_SPREAD)),
        ]
    });

    let label = Some(connection.label())
        .filter(|label| !label.is_empty())
        .map(|label| {
            let size = measurer.measure_text(label, font);
            let x = if reverse {
                start_x - PADDING / 2.0 - size.width()
            } else {
                start_x + PADDING / 2.0
            };
            TextPlacement::new(label, Point::new(x, y + size.height() + LABEL_GAP), size)
        });

    debug!(
        from = connection.from(),
        to = connection.to(),
        y,
        reverse;
        "Placed connection"
    );

    Ok(ConnectionLayout {
        line,
        arrowhead,
        label,
        reverse,
    })
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    /// Measures every character as 8x16 pixels.
    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn measure_text(&self, text: &str, _font: &FontFace) -> Size {
            Size::new(text.chars().count() as f32 * 8.0, 16.0)
        }
    }

    fn diagram(relations: &[(&str, &str, &str, bool)]) -> Diagram {
        let mut diagram = Diagram::new();
        for &(from, to, label, directional) in relations {
            diagram.add_elements([from, to]);
            diagram
                .add_connection(from, to, label, directional)
                .unwrap();
        }
        diagram
    }

    fn compute(diagram: &Diagram, width: f32, height: f32) -> Layout {
        Layout::compute(
            diagram,
            Size::new(width, height),
            &FixedMeasurer,
            Fonts::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_element_slots() {
        let diagram = diagram(&[("A", "B", "", true), ("B", "C", "", false)]);
        let layout = compute(&diagram, 1024.0, 1000.0);

        // slot = floor(1024 / 3) = 341
        let xs: Vec<f32> = layout.elements().map(|e| e.anchor().x()).collect();
        assert_approx_eq!(f32, xs[0], 138.5);
        assert_approx_eq!(f32, xs[1], 479.5);
        assert_approx_eq!(f32, xs[2], 820.5);

        for element in layout.elements() {
            assert_approx_eq!(f32, element.anchor().y(), 100.0);
            assert_approx_eq!(f32, element.top_box().width(), BOX_WIDTH);
            assert_approx_eq!(f32, element.top_box().height(), BOX_HEIGHT);
        }
    }

    #[test]
    fn test_repeated_names_take_one_slot() {
        let diagram = diagram(&[
            ("A", "B", "", true),
            ("B", "A", "", true),
            ("A", "A", "", false),
            ("C", "B", "", true),
        ]);
        let layout = compute(&diagram, 900.0, 1000.0);

        let names: Vec<&str> = layout.elements().map(|e| e.top_label().text()).collect();
        assert_eq!(names, ["A", "B", "C"]);

        // slot = 300, start_x = 300 * (i + 1) - 150 - 32
        let xs: Vec<f32> = layout.elements().map(|e| e.anchor().x()).collect();
        assert_approx_eq!(f32, xs[0], 118.0);
        assert_approx_eq!(f32, xs[1], 418.0);
        assert_approx_eq!(f32, xs[2], 718.0);
    }

    #[test]
    fn test_lifeline_and_bottom_box() {
        let diagram = diagram(&[("A", "B", "", true), ("B", "A", "", true)]);
        let layout = compute(&diagram, 1024.0, 1000.0);
        let a = layout.element("A").unwrap();

        // slot = 512, start_x = 512 - 256 - 32
        assert_approx_eq!(f32, a.anchor().x(), 224.0);

        let lifeline = a.lifeline();
        assert_approx_eq!(f32, lifeline.start().x(), 224.0 + 47.5);
        assert_approx_eq!(f32, lifeline.end().x(), 224.0 + 47.5);
        assert_approx_eq!(f32, lifeline.start().y(), 152.5);
        // Two connection rows plus one spare row
        assert_approx_eq!(f32, lifeline.end().y(), 302.5);

        assert_approx_eq!(f32, a.bottom_box().min_y(), 303.5);
        assert_approx_eq!(f32, a.bottom_box().min_x(), 224.0);
    }

    #[test]
    fn test_element_label_is_centered() {
        let diagram = diagram(&[("Alice", "Bob", "", true)]);
        let layout = compute(&diagram, 1024.0, 1000.0);
        let alice = layout.element("Alice").unwrap();

        // "Alice" measures 40x16
        let label = alice.top_label();
        assert_eq!(label.text(), "Alice");
        assert_approx_eq!(f32, label.origin().x(), alice.anchor().x() + 50.0 - 20.0);
        assert_approx_eq!(f32, label.origin().y(), 100.0 + 25.0 + 8.0);

        let bottom = alice.bottom_label();
        assert_approx_eq!(f32, bottom.origin().y(), alice.bottom_box().min_y() + 33.0);
    }

    #[test]
    fn test_forward_connection() {
        let diagram = diagram(&[("A", "B", "go", true)]);
        let layout = compute(&diagram, 1024.0, 1000.0);
        let connection = &layout.connections()[0];

        assert!(!connection.is_reverse());

        let line = connection.line();
        assert!(line.is_horizontal());
        assert_approx_eq!(f32, line.start().x(), 224.0 + 47.5);
        assert_approx_eq!(f32, line.end().x(), 736.0 + 47.5);
        assert_approx_eq!(f32, line.start().y(), 202.5);

        let [upper, lower] = connection.arrowhead().unwrap();
        assert_eq!(upper.start(), line.end());
        assert_eq!(upper.end(), Point::new(line.end().x() - 10.0, 192.5));
        assert_eq!(lower.end(), Point::new(line.end().x() - 10.0, 212.5));

        let label = connection.label().unwrap();
        assert_approx_eq!(f32, label.origin().x(), line.start().x() + 16.0);
        assert_approx_eq!(f32, label.origin().y(), 202.5 + 16.0 + 5.0);
    }

    #[test]
    fn test_reverse_connection_flips_arrow_and_label() {
        let diagram = diagram(&[("A", "B", "", true), ("B", "A", "back", true)]);
        let layout = compute(&diagram, 1024.0, 1000.0);
        let forward = &layout.connections()[0];
        let reverse = &layout.connections()[1];

        assert!(!forward.is_reverse());
        assert!(reverse.is_reverse());

        let forward_offset = forward.arrowhead().unwrap()[0].end().x() - forward.line().end().x();
        let reverse_offset = reverse.arrowhead().unwrap()[0].end().x() - reverse.line().end().x();
        assert_approx_eq!(f32, forward_offset, -ARROW_LENGTH);
        assert_approx_eq!(f32, reverse_offset, ARROW_LENGTH);

        // "back" measures 32 wide and sits left of the line start
        let label = reverse.label().unwrap();
        let start_x = reverse.line().start().x();
        assert_approx_eq!(f32, label.origin().x(), start_x - 16.0 - 32.0);
        assert!(label.origin().x() + label.size().width() < start_x);
    }

    #[test]
    fn test_plain_connection_has_no_arrowhead() {
        let diagram = diagram(&[("A", "B", "", false)]);
        let layout = compute(&diagram, 1024.0, 1000.0);
        let connection = &layout.connections()[0];

        assert!(connection.arrowhead().is_none());
        assert!(connection.label().is_none());
    }

    #[test]
    fn test_connection_rows_strictly_increase() {
        let diagram = diagram(&[
            ("A", "B", "1", true),
            ("C", "A", "2", true),
            ("B", "C", "3", false),
            ("A", "A", "4", true),
            ("C", "B", "5", true),
        ]);
        let layout = compute(&diagram, 1024.0, 1000.0);

        let ys: Vec<f32> = layout
            .connections()
            .iter()
            .map(|c| c.line().start().y())
            .collect();
        for pair in ys.windows(2) {
            assert!(pair[1] > pair[0], "rows out of order: {ys:?}");
        }
        assert_approx_eq!(f32, ys[4] - ys[0], 4.0 * ROW_HEIGHT);
    }

    #[test]
    fn test_title_is_centered() {
        let mut diagram = diagram(&[("A", "B", "", true)]);
        diagram.set_title("Demo");
        let layout = compute(&diagram, 1024.0, 1000.0);

        let title = layout.title().unwrap();
        assert_eq!(title.text(), "Demo");
        assert_approx_eq!(f32, title.origin().x(), 512.0 - 16.0);
        assert_approx_eq!(f32, title.origin().y(), 50.0);
    }

    #[test]
    fn test_empty_title_is_skipped() {
        let mut diagram = Diagram::new();
        diagram.set_title("");
        let layout = compute(&diagram, 1024.0, 1000.0);
        assert!(layout.title().is_none());
    }

    #[test]
    fn test_empty_diagram() {
        let layout = compute(&Diagram::new(), 1024.0, 1000.0);
        assert_eq!(layout.elements().len(), 0);
        assert!(layout.connections().is_empty());
        assert!(layout.title().is_none());
        assert_eq!(layout.canvas(), Size::new(1024.0, 1000.0));
    }

    #[test]
    fn test_fonts_sources_deduplicate() {
        assert!(Fonts::default().sources().is_empty());
    }
}
