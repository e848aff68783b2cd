//! Immutable raster snapshots of the canvas.

use crate::color::Rgba8;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Bytes per pixel (RGBA8).
pub const BYTES_PER_PIXEL: usize = 4;

/// Snapshot construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("Snapshot dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// A full copy of the canvas pixels at one instant.
///
/// Pixels are premultiplied RGBA8 in row-major order, which is the layout the
/// raster surface works in. The buffer is shared and never mutated, so
/// cloning a snapshot is cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    data: Arc<[u8]>,
}

impl Snapshot {
    /// Wrap an existing premultiplied RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, SnapshotError> {
        if width == 0 || height == 0 {
            return Err(SnapshotError::EmptyDimensions { width, height });
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(SnapshotError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data: data.into(),
        })
    }

    /// Create a snapshot filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> Result<Self, SnapshotError> {
        let pixel = premultiply(color);
        let data = pixel.repeat(width as usize * height as usize);
        Self::from_rgba(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Check whether two snapshots share the same buffer allocation.
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Read a pixel as straight-alpha color.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = &self.data[offset..offset + BYTES_PER_PIXEL];
        Some(demultiply([px[0], px[1], px[2], px[3]]))
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Convert a straight-alpha color to premultiplied bytes.
pub fn premultiply(color: Rgba8) -> [u8; 4] {
    let a = color.a as u32;
    let mul = |c: u8| ((c as u32 * a + 127) / 255) as u8;
    [mul(color.r), mul(color.g), mul(color.b), color.a]
}

/// Convert premultiplied bytes back to a straight-alpha color.
pub fn demultiply(px: [u8; 4]) -> Rgba8 {
    let a = px[3] as u32;
    if a == 0 {
        return Rgba8::TRANSPARENT;
    }
    let div = |c: u8| ((c as u32 * 255 + a / 2) / a).min(255) as u8;
    Rgba8::new(div(px[0]), div(px[1]), div(px[2]), px[3])
}
