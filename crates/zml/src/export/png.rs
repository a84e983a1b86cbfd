//! PNG rasterization of SVG documents via `resvg`.

use std::path::Path;

use log::{debug, info, warn};
use resvg::{tiny_skia, usvg};

use super::Error;

/// Rasterize an SVG document into PNG bytes.
///
/// System fonts are always available; each of `font_files` is loaded in
/// addition so text drawn with custom families renders with the same font
/// it was measured with. A font that fails to load is skipped with a
/// warning.
///
/// # Errors
///
/// Returns [`Error::Svg`] if the document cannot be parsed,
/// [`Error::Pixmap`] if the image is empty or too large, and
/// [`Error::Encode`] if PNG encoding fails.
pub fn rasterize(svg: &str, font_files: &[&Path]) -> Result<Vec<u8>, Error> {
    let mut options = usvg::Options::default();
    let fontdb = options.fontdb_mut();
    fontdb.load_system_fonts();
    for path in font_files {
        let display = path.display().to_string();
        match fontdb.load_font_file(path) {
            Ok(()) => debug!(path = display; "Loaded font for rasterization"),
            Err(err) => warn!(path = display, err:err; "Failed to load font for rasterization"),
        }
    }

    let tree = usvg::Tree::from_str(svg, &options)?;
    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(Error::Pixmap { width, height })?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let png = pixmap
        .encode_png()
        .map_err(|err| Error::Encode(err.to_string()))?;

    info!(width, height, bytes = png.len(); "Rasterized PNG");
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_rasterize_simple_document() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="30" viewBox="0 0 40 30">
            <rect x="0" y="0" width="40" height="30" fill="#ffffff"/>
            <line x1="0" y1="15" x2="40" y2="15" stroke="#000000" stroke-width="1"/>
        </svg>"##;

        let png = rasterize(svg, &[]).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
    }

    #[test]
    fn test_missing_font_file_is_skipped() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"/>"#;
        let png = rasterize(svg, &[Path::new("/nonexistent/Font.ttf")]).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
    }

    #[test]
    fn test_invalid_svg() {
        let err = rasterize("not svg", &[]).unwrap_err();
        assert!(matches!(err, Error::Svg(_)));
    }
}
