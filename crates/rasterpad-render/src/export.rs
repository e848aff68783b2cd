//! Canvas export encoders.

use base64::{Engine, engine::general_purpose::STANDARD};
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use rasterpad_core::color::Rgba8;
use rasterpad_core::input::ExportFormat;
use rasterpad_core::snapshot::{Snapshot, demultiply};
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
}

/// Settings that affect encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// Color translucent pixels are flattened onto for JPEG.
    pub background: Rgba8,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            background: Rgba8::WHITE,
            jpeg_quality: 90,
        }
    }
}

/// Encode a snapshot in the requested format.
pub fn encode(
    snapshot: &Snapshot,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let bytes = match format {
        ExportFormat::Png => encode_png(snapshot)?,
        ExportFormat::Jpeg => encode_jpeg(snapshot, options)?,
        ExportFormat::Svg => encode_svg(snapshot)?.into_bytes(),
    };
    log::info!(
        "Exported {}x{} canvas as {} ({} bytes)",
        snapshot.width(),
        snapshot.height(),
        format,
        bytes.len()
    );
    Ok(bytes)
}

/// Encode a snapshot as straight-alpha RGBA8 PNG.
pub fn encode_png(snapshot: &Snapshot) -> Result<Vec<u8>, ExportError> {
    let rgba = straight_rgba(snapshot);
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, snapshot.width(), snapshot.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba)?;
        writer.finish()?;
    }
    Ok(png_data)
}

/// Encode a snapshot as RGB8 JPEG, flattening alpha onto the background.
pub fn encode_jpeg(snapshot: &Snapshot, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let bg = options.background;
    let blend = |c: u8, b: u8, a: u32| ((c as u32 * a + b as u32 * (255 - a) + 127) / 255) as u8;
    let rgb: Vec<u8> = snapshot
        .data()
        .chunks_exact(4)
        .flat_map(|px| {
            let color = demultiply([px[0], px[1], px[2], px[3]]);
            let a = color.a as u32;
            [blend(color.r, bg.r, a), blend(color.g, bg.g, a), blend(color.b, bg.b, a)]
        })
        .collect();

    let mut jpeg_data = Vec::new();
    let quality = options.jpeg_quality.clamp(1, 100);
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg_data, quality);
    encoder.encode(&rgb, snapshot.width(), snapshot.height(), ExtendedColorType::Rgb8)?;
    Ok(jpeg_data)
}

/// Wrap the raster in a minimal SVG document as an embedded PNG image.
///
/// This keeps the pixels intact for tools that only accept SVG; it does
/// not reconstruct vector shapes.
pub fn encode_svg(snapshot: &Snapshot) -> Result<String, ExportError> {
    let png_data = encode_png(snapshot)?;
    let (width, height) = (snapshot.width(), snapshot.height());
    Ok(format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" "#,
            r#"width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<image width="{w}" height="{h}" href="data:image/png;base64,{data}"/>"#,
            "</svg>"
        ),
        w = width,
        h = height,
        data = STANDARD.encode(&png_data),
    ))
}

/// Convert snapshot pixels to straight-alpha RGBA8.
pub fn straight_rgba(snapshot: &Snapshot) -> Vec<u8> {
    snapshot
        .data()
        .chunks_exact(4)
        .flat_map(|px| {
            let c = demultiply([px[0], px[1], px[2], px[3]]);
            [c.r, c.g, c.b, c.a]
        })
        .collect()
}
