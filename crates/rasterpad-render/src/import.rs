//! Decoding of user-selected image files.

use image::imageops::FilterType;
use thiserror::Error;

/// Image import errors.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("No image data")]
    Empty,
    #[error("Unreadable image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decode image bytes and stretch them to exactly `width` x `height`.
///
/// Returns straight-alpha RGBA8 pixels. Nothing is drawn here, so a failed
/// decode leaves the canvas untouched.
pub fn decode_for_canvas(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ImportError> {
    if bytes.is_empty() {
        return Err(ImportError::Empty);
    }
    let decoded = image::load_from_memory(bytes)?;
    log::debug!(
        "Decoded {}x{} image, scaling to {}x{}",
        decoded.width(),
        decoded.height(),
        width,
        height
    );
    let scaled = if (decoded.width(), decoded.height()) == (width, height) {
        decoded.to_rgba8()
    } else {
        decoded.resize_exact(width, height, FilterType::Triangle).to_rgba8()
    };
    Ok(scaled.into_raw())
}
