//! The live raster canvas.

use crate::renderer::{RenderResult, RendererError, draw_overlay};
use rasterpad_core::color::Rgba8;
use rasterpad_core::overlay::Overlay;
use rasterpad_core::snapshot::{Snapshot, demultiply, premultiply};
use tiny_skia::{Color, IntSize, Pixmap, PixmapPaint, Transform};

/// Mutable raster the user draws on.
///
/// All drawing happens through tiny-skia in premultiplied RGBA8, the same
/// layout [`Snapshot`] stores, so capture and restore are plain copies.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    /// Create a surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba8) -> RenderResult<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RendererError::SurfaceAlloc { width, height })?;
        let mut surface = Self { pixmap };
        surface.fill(background);
        Ok(surface)
    }

    /// Create a surface holding a copy of `snapshot`.
    pub fn from_snapshot(snapshot: &Snapshot) -> RenderResult<Self> {
        let (width, height) = (snapshot.width(), snapshot.height());
        let size =
            IntSize::from_wh(width, height).ok_or(RendererError::SurfaceAlloc { width, height })?;
        let pixmap = Pixmap::from_vec(snapshot.data().to_vec(), size)
            .ok_or(RendererError::SurfaceAlloc { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Copy the current pixels into a snapshot.
    pub fn capture(&self) -> RenderResult<Snapshot> {
        Ok(Snapshot::from_rgba(self.width(), self.height(), self.pixmap.data().to_vec())?)
    }

    /// Replace the current pixels with `snapshot`.
    pub fn restore(&mut self, snapshot: &Snapshot) -> RenderResult<()> {
        let expected = (self.width(), self.height());
        let actual = (snapshot.width(), snapshot.height());
        if expected != actual {
            return Err(RendererError::SizeMismatch { expected, actual });
        }
        self.pixmap.data_mut().copy_from_slice(snapshot.data());
        Ok(())
    }

    /// Fill the whole surface with one color.
    pub fn fill(&mut self, color: Rgba8) {
        self.pixmap.fill(Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    /// Draw an overlay on top of the current pixels.
    pub fn draw(&mut self, overlay: &Overlay) -> bool {
        draw_overlay(&mut self.pixmap, overlay)
    }

    /// Composite a straight-alpha RGBA8 image at the top-left corner.
    ///
    /// The image must already be scaled to the surface size.
    pub fn draw_rgba_image(&mut self, width: u32, height: u32, rgba: &[u8]) -> RenderResult<()> {
        let size =
            IntSize::from_wh(width, height).ok_or(RendererError::SurfaceAlloc { width, height })?;
        let premultiplied: Vec<u8> = rgba
            .chunks_exact(4)
            .flat_map(|px| premultiply(Rgba8::new(px[0], px[1], px[2], px[3])))
            .collect();
        let source = Pixmap::from_vec(premultiplied, size)
            .ok_or(RendererError::SurfaceAlloc { width, height })?;
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }

    /// Read a pixel as straight-alpha color.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.pixmap
            .pixel(x, y)
            .map(|px| demultiply([px.red(), px.green(), px.blue(), px.alpha()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use rasterpad_core::overlay::{OverlayShape, Paint};

    #[test]
    fn test_new_surface_is_background() {
        let surface = RasterSurface::new(10, 5, Rgba8::WHITE).unwrap();
        assert_eq!(surface.width(), 10);
        assert_eq!(surface.height(), 5);
        assert_eq!(surface.pixel(9, 4), Some(Rgba8::WHITE));
        assert_eq!(surface.pixel(10, 0), None);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            RasterSurface::new(0, 10, Rgba8::WHITE),
            Err(RendererError::SurfaceAlloc { .. })
        ));
    }

    #[test]
    fn test_capture_restore() {
        let mut surface = RasterSurface::new(50, 50, Rgba8::WHITE).unwrap();
        let before = surface.capture().unwrap();

        surface.draw(&Overlay::new(
            OverlayShape::Line {
                start: Point::new(0.0, 25.0),
                end: Point::new(50.0, 25.0),
            },
            Paint::stroke(Rgba8::BLACK, 4.0),
        ));
        assert_ne!(surface.capture().unwrap(), before);

        surface.restore(&before).unwrap();
        assert_eq!(surface.capture().unwrap(), before);
    }

    #[test]
    fn test_restore_size_mismatch() {
        let mut surface = RasterSurface::new(4, 4, Rgba8::WHITE).unwrap();
        let other = Snapshot::solid(5, 4, Rgba8::BLACK).unwrap();
        assert!(matches!(
            surface.restore(&other),
            Err(RendererError::SizeMismatch { .. })
        ));
        assert_eq!(surface.pixel(0, 0), Some(Rgba8::WHITE));
    }

    #[test]
    fn test_draw_rgba_image() {
        let mut surface = RasterSurface::new(2, 1, Rgba8::WHITE).unwrap();
        let image = [255, 0, 0, 255, 0, 0, 255, 0];
        surface.draw_rgba_image(2, 1, &image).unwrap();
        assert_eq!(surface.pixel(0, 0), Some(Rgba8::opaque(255, 0, 0)));
        // Fully transparent pixels leave the background visible
        assert_eq!(surface.pixel(1, 0), Some(Rgba8::WHITE));
    }
}
