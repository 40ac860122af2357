#![forbid(unsafe_code)]

//! PNG export for rendered maps.
//!
//! The export pipeline is "serialize SVG, decode, draw, encode": the SVG
//! text is parsed into a tree, rasterized into an owned pixmap and encoded.
//! Decode failures surface as [`RasterError`] rather than being dropped, and
//! no temporary resources outlive the call (all buffers are owned values).

use egomap_core::StakeholderRecord;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Pixel density multiplier. Exports default to 2x for sharpness.
    pub scale: f32,
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: None,
        }
    }
}

/// Renders records straight to PNG bytes.
///
/// Returns `Ok(None)` for a zero-size viewport (a no-op render, not an
/// error).
pub fn render_png_sync(
    records: &[StakeholderRecord],
    viewport_width: f64,
    viewport_height: f64,
    raster: &RasterOptions,
) -> Result<Option<Vec<u8>>> {
    let Some(svg) = super::render_svg_sync(records, viewport_width, viewport_height) else {
        return Ok(None);
    };
    Ok(Some(svg_to_png(&svg, raster)?))
}

/// Async export wrapper: suspends over the decode-and-draw step, then hands
/// back the encoded bytes. Runtime-agnostic.
pub async fn export_png(
    records: &[StakeholderRecord],
    viewport_width: f64,
    viewport_height: f64,
    raster: &RasterOptions,
) -> Result<Option<Vec<u8>>> {
    render_png_sync(records, viewport_width, viewport_height, raster)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

#[derive(Debug, Clone, Copy)]
struct ParsedViewBox {
    width: f32,
    height: f32,
}

fn parse_svg_viewbox(svg: &str) -> Option<ParsedViewBox> {
    // Cheap, non-validating parse for root viewBox: `viewBox="minX minY w h"`.
    // Sufficient for our own writer's output.
    let i = svg.find("viewBox=\"")?;
    let rest = &svg[i + "viewBox=\"".len()..];
    let end = rest.find('"')?;
    let raw = &rest[..end];
    let mut it = raw.split_whitespace();
    let _min_x = it.next()?.parse::<f32>().ok()?;
    let _min_y = it.next()?.parse::<f32>().ok()?;
    let width = it.next()?.parse::<f32>().ok()?;
    let height = it.next()?.parse::<f32>().ok()?;
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Some(ParsedViewBox { width, height })
    } else {
        None
    }
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    // Keep output stable-ish across environments while still using system fonts.
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    let (width, height) = match parse_svg_viewbox(svg) {
        Some(vb) => (vb.width, vb.height),
        None => {
            let size = tree.size();
            (size.width(), size.height())
        }
    };

    let width_px = (width * scale).ceil().max(1.0) as u32;
    let height_px = (height * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;

    if let Some(bg) = background {
        if let Some(color) = parse_tiny_skia_color(bg) {
            pixmap.fill(color);
        }
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::from_rgba8(255, 255, 255, 255)),
        "black" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 255)),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => Some(tiny_skia::Color::from_rgba8(
            hex1(bytes[0])?,
            hex1(bytes[1])?,
            hex1(bytes[2])?,
            255,
        )),
        6 => Some(tiny_skia::Color::from_rgba8(
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            255,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn svg_to_png_produces_png_signature() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="10" height="10" fill="black"/></svg>"#;
        let bytes = svg_to_png(svg, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn default_scale_doubles_pixel_density() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="10" height="10" fill="black"/></svg>"#;
        let pixmap = svg_to_pixmap(svg, RasterOptions::default().scale, None).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (20, 20));
    }

    #[test]
    fn decode_failure_is_reported_not_dropped() {
        let err = svg_to_png("this is not svg", &RasterOptions::default()).unwrap_err();
        assert!(matches!(err, RasterError::SvgParse));
    }

    #[test]
    fn zero_viewport_exports_nothing() {
        let records = vec![egomap_core::StakeholderRecord::fresh("Alice")];
        let out = render_png_sync(&records, 0.0, 0.0, &RasterOptions::default()).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn async_export_png_round_trips() {
        let records = vec![egomap_core::StakeholderRecord::fresh("Alice")];
        let bytes = block_on(export_png(&records, 400.0, 300.0, &RasterOptions::default()))
            .unwrap()
            .unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }
}
