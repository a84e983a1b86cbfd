//! Export functionality for ZML diagrams.
//!
//! A computed [`Layout`](crate::layout::Layout) is drawn onto an
//! [`svg::SvgSurface`], and the finished document can then be rasterized
//! with [`png::rasterize`].
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parse + elaborate
//! Diagram
//!     ↓ layout
//! Layout
//!     ↓ render onto SvgSurface (this module)
//! SVG document
//!     ↓ rasterize (this module)
//! PNG bytes
//! ```
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`ZmlError::Export`] at the crate boundary.
//!
//! [`ZmlError::Export`]: crate::ZmlError::Export

/// PNG rasterization.
pub mod png;
/// SVG drawing surface.
pub mod svg;

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// The generated SVG could not be parsed back for rasterization.
    Svg(resvg::usvg::Error),
    /// A pixel buffer of the requested size could not be allocated.
    Pixmap { width: u32, height: u32 },
    /// PNG encoding failed; carries the encoder message.
    Encode(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Svg(err) => write!(f, "Invalid SVG: {err}"),
            Self::Pixmap { width, height } => {
                write!(f, "Cannot allocate a {width}x{height} image")
            }
            Self::Encode(msg) => write!(f, "PNG encoding failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Svg(err) => Some(err),
            Self::Pixmap { .. } | Self::Encode(_) => None,
        }
    }
}

impl From<resvg::usvg::Error> for Error {
    fn from(err: resvg::usvg::Error) -> Self {
        Self::Svg(err)
    }
}
