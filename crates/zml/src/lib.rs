//! ZML - a tiny markup language for sequence diagrams.
//!
//! Parsing, layout and rendering for ZML documents. A document names the
//! messages exchanged between elements, one per line:
//!
//! ```text
//! title: Checkout
//! Browser->Server: POST /cart
//! Server-->Database: insert
//! Database--Server
//! ```
//!
//! [`DiagramBuilder`] runs the whole pipeline and produces SVG or PNG output.

pub mod config;
pub mod export;
pub mod layout;
pub mod render;

mod error;

pub use zml_core::{color, draw, geometry, semantic};
pub use zml_parser::{ParseOutput, error as diagnostics};

pub use error::ZmlError;

use log::{debug, info, trace};

use zml_core::draw::TextManager;

use config::AppConfig;
use export::svg::SvgSurface;
use layout::{Fonts, Layout};

/// Builder for parsing and rendering ZML diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use zml::{DiagramBuilder, config::AppConfig};
///
/// let source = "title: Demo\nAlice->Bob: hello";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Parse source to the diagram model
/// let output = builder.parse(source).expect("Failed to parse");
///
/// // Render the model to PNG bytes
/// let png = builder
///     .render_png(&output.diagram)
///     .expect("Failed to render");
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration this builder renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into a diagram.
    ///
    /// Fonts and the font directory from the configuration are attached to
    /// the diagram. Lines that were skipped are returned as warnings next to
    /// the diagram.
    ///
    /// # Errors
    ///
    /// Returns [`ZmlError::Parse`] when a relation cannot be added to the
    /// diagram, and [`ZmlError::Config`] for a malformed font setting.
    pub fn parse(&self, source: &str) -> Result<ParseOutput, ZmlError> {
        info!("Parsing diagram");

        let mut output = zml_parser::build_diagram(source)
            .map_err(|err| ZmlError::new_parse_error(err, source))?;
        self.apply_typography(&mut output.diagram)?;

        debug!(warnings = output.warnings.len(); "Diagram parsed successfully");
        trace!(diagram:? = output.diagram; "Parsed diagram");

        Ok(output)
    }

    /// Compute the layout of `diagram` on the configured canvas.
    ///
    /// # Errors
    ///
    /// Returns [`ZmlError::Config`] for an empty canvas and
    /// [`ZmlError::Layout`] if the diagram is inconsistent.
    pub fn layout(&self, diagram: &semantic::Diagram) -> Result<Layout, ZmlError> {
        let canvas = self.config.canvas();
        if canvas.width() == 0 || canvas.height() == 0 {
            return Err(ZmlError::Config(format!(
                "canvas must not be empty, got {}x{}",
                canvas.width(),
                canvas.height()
            )));
        }

        let manager = TextManager::global();
        let fonts = Fonts::resolve(diagram.typography(), manager);
        debug!(
            title = fonts.title().family(),
            element = fonts.element().family(),
            label = fonts.label().family();
            "Resolved fonts"
        );

        Ok(Layout::compute(diagram, canvas.size(), manager, fonts)?)
    }

    /// Render a diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// See [`DiagramBuilder::layout`].
    pub fn render_svg(&self, diagram: &semantic::Diagram) -> Result<String, ZmlError> {
        let layout = self.layout(diagram)?;
        Ok(self.draw_svg(&layout))
    }

    /// Render a diagram to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ZmlError::Export`] if rasterization fails, in addition to
    /// the errors of [`DiagramBuilder::layout`].
    pub fn render_png(&self, diagram: &semantic::Diagram) -> Result<Vec<u8>, ZmlError> {
        let layout = self.layout(diagram)?;
        let svg = self.draw_svg(&layout);

        info!("Rasterizing diagram");
        Ok(export::png::rasterize(&svg, &layout.fonts().sources())?)
    }

    fn draw_svg(&self, layout: &Layout) -> String {
        info!("Rendering diagram");
        let mut surface = SvgSurface::new(layout.canvas(), TextManager::global());
        render::render(layout, &self.config.style().render_style(), &mut surface);
        surface.finish()
    }

    fn apply_typography(&self, diagram: &mut semantic::Diagram) -> Result<(), ZmlError> {
        let style = self.config.style();

        if let Some(dir) = style.font_dir() {
            diagram.set_font_dir(dir);
        }
        if let Some(font) = style.title_font()? {
            diagram.set_title_font(font);
        }
        if let Some(font) = style.element_font()? {
            diagram.set_element_label_font(font);
        }
        if let Some(font) = style.label_font()? {
            diagram.set_label_font(font);
        }

        Ok(())
    }
}
