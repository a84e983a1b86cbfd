//! Fonts and text measurement.
//!
//! # Overview
//!
//! - [`FontSpec`] - A font file name plus point size, as written by users
//!   (`"Roboto-Bold.ttf,30"`)
//! - [`FontFace`] - A font ready for drawing: family name, size and the file
//!   it was loaded from
//! - [`TextMeasurer`] - Anything that can report the rendered size of a string
//! - [`TextManager`] - The process-wide cosmic-text backed measurer and font
//!   loader
//!
//! Font files are loaded once per path; later requests for the same file are
//! answered from a cache. A font that cannot be loaded is reported with a
//! warning and the default face is used instead.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    path::{Path, PathBuf},
    sync::{Mutex, OnceLock, PoisonError},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{debug, info, warn};
use thiserror::Error;

use crate::geometry::Size;

/// Family used when no font file is configured or loading fails.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Size used when no font file is configured or loading fails.
pub const DEFAULT_FONT_SIZE: f32 = 13.0;

/// Ratio between the line height and the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Error returned when a font specification cannot be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FontSpecError {
    #[error("font specification is empty")]
    Empty,

    #[error("invalid font size `{0}` (expected a positive number)")]
    InvalidSize(String),
}

/// A user supplied font: file name relative to the font directory plus size.
///
/// # Examples
///
/// ```
/// # use zml_core::draw::FontSpec;
/// let spec = FontSpec::parse("Roboto-Bold.ttf,30", 15.0).unwrap();
/// assert_eq!(spec.file(), "Roboto-Bold.ttf");
/// assert_eq!(spec.size(), 30.0);
///
/// // The size falls back to the role default
/// let spec = FontSpec::parse("Roboto-Italic.ttf", 15.0).unwrap();
/// assert_eq!(spec.size(), 15.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    file: String,
    size: f32,
}

impl FontSpec {
    /// Creates a font specification.
    pub fn new(file: impl Into<String>, size: f32) -> Self {
        Self {
            file: file.into(),
            size,
        }
    }

    /// Parses `"<file>[,<size>]"`, using `default_size` when the size is omitted.
    ///
    /// # Errors
    ///
    /// Returns [`FontSpecError`] when the file name is empty or the size is
    /// not a positive number.
    pub fn parse(value: &str, default_size: f32) -> Result<Self, FontSpecError> {
        let (file, size) = match value.split_once(',') {
            Some((file, size)) => {
                let size = size.trim();
                let parsed = size
                    .parse::<f32>()
                    .ok()
                    .filter(|size| size.is_finite() && *size > 0.0)
                    .ok_or_else(|| FontSpecError::InvalidSize(size.to_string()))?;
                (file.trim(), parsed)
            }
            None => (value.trim(), default_size),
        };

        if file.is_empty() {
            return Err(FontSpecError::Empty);
        }

        Ok(Self::new(file, size))
    }

    /// Returns the font file name.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the font size in points.
    pub fn size(&self) -> f32 {
        self.size
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.file, self.size)
    }
}

/// A font ready to be measured and drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    family: String,
    size: f32,
    source: Option<PathBuf>,
}

impl FontFace {
    /// Creates a face for an already known family.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            source: None,
        }
    }

    /// Returns the family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the size in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Returns the font file this face was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns the line height used for measurement.
    pub fn line_height(&self) -> f32 {
        self.size * LINE_HEIGHT_FACTOR
    }
}

impl Default for FontFace {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE)
    }
}

/// Reports the rendered size of text.
///
/// The layout engine only depends on this trait, which keeps the geometry
/// testable without loading any fonts.
pub trait TextMeasurer {
    /// Returns the width and line height of `text` rendered with `font`.
    fn measure_text(&self, text: &str, font: &FontFace) -> Size;
}

/// Font loading and text measurement backed by cosmic-text.
///
/// Holds a single `FontSystem` for the whole process, plus a cache from font
/// file path to the family name found in it (`None` when loading failed).
pub struct TextManager {
    font_system: Mutex<FontSystem>,
    loaded: Mutex<HashMap<PathBuf, Option<String>>>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the process-wide text manager.
    pub fn global() -> &'static TextManager {
        TEXT_MANAGER.get_or_init(TextManager::new)
    }

    /// Resolve a font specification into a drawable face.
    ///
    /// Without a font directory or specification the default face is
    /// returned. When the file cannot be loaded a warning is logged and the
    /// default face is returned as well.
    pub fn resolve_font(&self, font_dir: Option<&Path>, spec: Option<&FontSpec>) -> FontFace {
        let (Some(dir), Some(spec)) = (font_dir, spec) else {
            return FontFace::default();
        };

        let path = dir.join(spec.file());
        match self.load_family(&path) {
            Some(family) => FontFace {
                family,
                size: spec.size(),
                source: Some(path),
            },
            None => FontFace::default(),
        }
    }

    fn load_family(&self, path: &Path) -> Option<String> {
        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(family) = loaded.get(path) {
            return family.clone();
        }

        let family = self.load_font_file(path);
        loaded.insert(path.to_path_buf(), family.clone());
        family
    }

    fn load_font_file(&self, path: &Path) -> Option<String> {
        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let db = font_system.db_mut();

        let known: HashSet<_> = db.faces().map(|face| face.id).collect();
        if let Err(err) = db.load_font_file(path) {
            warn!(path = path.display().to_string(), err:err; "Failed to load font, using default");
            return None;
        }

        let family = db
            .faces()
            .filter(|face| !known.contains(&face.id))
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()));

        match &family {
            Some(name) => {
                debug!(path = path.display().to_string(), family = name.as_str(); "Loaded font")
            }
            None => {
                warn!(path = path.display().to_string(); "Font file contains no faces, using default")
            }
        }

        family
    }
}

impl TextMeasurer for TextManager {
    /// Measures with real font metrics and shaping.
    fn measure_text(&self, text: &str, font: &FontFace) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let metrics = Metrics::new(font.size(), font.line_height());
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let family = match font.family() {
            DEFAULT_FONT_FAMILY => Family::SansSerif,
            name => Family::Name(name),
        };
        let attrs = Attrs::new().family(family);

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if !layout_runs.is_empty() {
            for run in &layout_runs {
                if let Some(glyph) = run.glyphs.last() {
                    max_width = max_width.max(glyph.x + glyph.w);
                }
                total_height += metrics.line_height;
            }
        } else {
            // No usable fonts on this system; estimate from the character count
            max_width = text.chars().count() as f32 * (font.size() * 0.55);
            total_height = metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
