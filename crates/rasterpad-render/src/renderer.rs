//! Overlay rasterization.

use crate::surface::RasterSurface;
use kurbo::{BezPath, PathEl};
use rasterpad_core::overlay::{Overlay, OverlayShape, PaintMode};
use rasterpad_core::snapshot::{Snapshot, SnapshotError};
use thiserror::Error;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Cannot allocate a {width}x{height} surface")]
    SurfaceAlloc { width: u32, height: u32 },
    #[error("Snapshot is {actual:?}, surface is {expected:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Convert a kurbo path into a tiny-skia path.
///
/// Returns `None` for paths with nothing to draw (empty, or a lone move).
pub fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

/// Draw one overlay onto a pixmap.
///
/// Returns false when the overlay is degenerate and nothing was drawn.
pub fn draw_overlay(pixmap: &mut Pixmap, overlay: &Overlay) -> bool {
    let Some(path) = to_skia_path(&overlay.to_path()) else {
        return false;
    };

    let color = overlay.paint.color;
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;

    match overlay.paint.mode {
        PaintMode::Fill => {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        PaintMode::Stroke => {
            let mut stroke = Stroke {
                width: overlay.paint.width as f32,
                ..Stroke::default()
            };
            // Freehand strokes need round joins to stay continuous
            if matches!(overlay.shape, OverlayShape::Path { .. }) {
                stroke.line_cap = LineCap::Round;
                stroke.line_join = LineJoin::Round;
            }
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
    true
}

/// Draw `overlay` over `base` and return the result.
///
/// This is the preview function: it never touches live canvas state, so
/// calling it repeatedly with the same inputs yields identical rasters.
pub fn render(base: &Snapshot, overlay: &Overlay) -> RenderResult<Snapshot> {
    let mut surface = RasterSurface::from_snapshot(base)?;
    surface.draw(overlay);
    surface.capture()
}
