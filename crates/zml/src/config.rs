//! Configuration types for ZML diagram rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field is optional and falls back to the renderer
//! defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining canvas and style settings.
//! - [`CanvasConfig`] - Output image dimensions.
//! - [`StyleConfig`] - Colors, font directory and per-role fonts.
//!
//! # Example
//!
//! ```
//! # use zml::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.canvas().width(), 1024);
//! assert_eq!(config.style().background_color().rgb8(), (255, 255, 255));
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use zml_core::{
    color::Color,
    draw::{FontSpec, FontSpecError},
    geometry::Size,
};

use crate::render::RenderStyle;

/// Default output width and height in pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = 1024;

pub const DEFAULT_BACKGROUND_COLOR: &str = "white";
pub const DEFAULT_ELEMENT_FILL_COLOR: &str = "platered";
pub const DEFAULT_ELEMENT_TEXT_COLOR: &str = "white";

/// Size of the title font when a font file is given without a size.
pub const DEFAULT_TITLE_FONT_SIZE: f32 = 30.0;

/// Size of element and connection label fonts when a font file is given
/// without a size.
pub const DEFAULT_LABEL_FONT_SIZE: f32 = 15.0;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(canvas: CanvasConfig, style: StyleConfig) -> Self {
        Self { canvas, style }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasConfig {
        &mut self.canvas
    }

    pub fn style_mut(&mut self) -> &mut StyleConfig {
        &mut self.style
    }
}

/// Output image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_size")]
    width: u32,

    #[serde(default = "default_canvas_size")]
    height: u32,
}

fn default_canvas_size() -> u32 {
    DEFAULT_CANVAS_SIZE
}

impl CanvasConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    /// The canvas as a geometric size.
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_SIZE, DEFAULT_CANVAS_SIZE)
    }
}

/// Visual styling configuration.
///
/// Colors are color tokens as accepted by [`Color::resolve`]; fonts use the
/// `"<file>[,<size>]"` form and are looked up in `font_dir`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    element_fill_color: Option<String>,

    #[serde(default)]
    element_text_color: Option<String>,

    #[serde(default)]
    font_dir: Option<PathBuf>,

    #[serde(default)]
    title_font: Option<String>,

    #[serde(default)]
    element_font: Option<String>,

    #[serde(default)]
    label_font: Option<String>,
}

impl StyleConfig {
    /// Canvas background color. Defaults to white.
    pub fn background_color(&self) -> Color {
        resolve_or(self.background_color.as_deref(), DEFAULT_BACKGROUND_COLOR)
    }

    /// Fill color of element boxes. Defaults to `platered`.
    pub fn element_fill_color(&self) -> Color {
        resolve_or(
            self.element_fill_color.as_deref(),
            DEFAULT_ELEMENT_FILL_COLOR,
        )
    }

    /// Color of element names. Defaults to white.
    pub fn element_text_color(&self) -> Color {
        resolve_or(
            self.element_text_color.as_deref(),
            DEFAULT_ELEMENT_TEXT_COLOR,
        )
    }

    pub fn font_dir(&self) -> Option<&Path> {
        self.font_dir.as_deref()
    }

    /// The title font, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`FontSpecError`] if the configured value is malformed.
    pub fn title_font(&self) -> Result<Option<FontSpec>, FontSpecError> {
        parse_font(self.title_font.as_deref(), DEFAULT_TITLE_FONT_SIZE)
    }

    /// The element label font, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`FontSpecError`] if the configured value is malformed.
    pub fn element_font(&self) -> Result<Option<FontSpec>, FontSpecError> {
        parse_font(self.element_font.as_deref(), DEFAULT_LABEL_FONT_SIZE)
    }

    /// The connection label font, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`FontSpecError`] if the configured value is malformed.
    pub fn label_font(&self) -> Result<Option<FontSpec>, FontSpecError> {
        parse_font(self.label_font.as_deref(), DEFAULT_LABEL_FONT_SIZE)
    }

    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = Some(color.into());
    }

    pub fn set_element_fill_color(&mut self, color: impl Into<String>) {
        self.element_fill_color = Some(color.into());
    }

    pub fn set_element_text_color(&mut self, color: impl Into<String>) {
        self.element_text_color = Some(color.into());
    }

    pub fn set_font_dir(&mut self, dir: impl Into<PathBuf>) {
        self.font_dir = Some(dir.into());
    }

    pub fn set_title_font(&mut self, font: impl Into<String>) {
        self.title_font = Some(font.into());
    }

    pub fn set_element_font(&mut self, font: impl Into<String>) {
        self.element_font = Some(font.into());
    }

    pub fn set_label_font(&mut self, font: impl Into<String>) {
        self.label_font = Some(font.into());
    }

    /// Colors used by the render driver.
    pub fn render_style(&self) -> RenderStyle {
        RenderStyle::new(
            self.background_color(),
            self.element_fill_color(),
            self.element_text_color(),
        )
    }
}

fn resolve_or(token: Option<&str>, default: &str) -> Color {
    Color::resolve(token.unwrap_or(default))
}

fn parse_font(value: Option<&str>, default_size: f32) -> Result<Option<FontSpec>, FontSpecError> {
    value
        .map(|value| FontSpec::parse(value, default_size))
        .transpose()
}
