//! Geometry of the single shape drawn over the reference raster.

use crate::color::Rgba8;
use crate::tools::{ToolKind, ToolSettings};
use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape};
use std::f64::consts::PI;

/// Inner radius of the star tool, in pixels.
pub const STAR_INNER_RADIUS: f64 = 10.0;
/// Outer radius of the star tool, in pixels.
pub const STAR_OUTER_RADIUS: f64 = 20.0;
/// Number of star tips.
pub const STAR_POINTS: usize = 5;

/// Flattening tolerance for curved outlines.
const PATH_TOLERANCE: f64 = 0.1;

/// How an overlay is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintMode {
    #[default]
    Stroke,
    Fill,
}

/// Paint applied to an overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Rgba8,
    pub width: f64,
    pub mode: PaintMode,
}

impl Paint {
    pub fn stroke(color: Rgba8, width: f64) -> Self {
        Self {
            color,
            width,
            mode: PaintMode::Stroke,
        }
    }

    pub fn fill(color: Rgba8) -> Self {
        Self {
            color,
            width: 0.0,
            mode: PaintMode::Fill,
        }
    }
}

/// Shape drawn for one preview frame.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayShape {
    /// Continuous freehand path (brush and eraser).
    Path { points: Vec<Point> },
    /// Axis-aligned rectangle.
    Rectangle { rect: Rect },
    /// Circle around the drag origin.
    Circle { center: Point, radius: f64 },
    /// Isosceles triangle with the apex at the drag origin.
    Triangle { vertices: [Point; 3] },
    /// Straight segment.
    Line { start: Point, end: Point },
    /// Fixed-size star.
    Star { center: Point },
}

impl OverlayShape {
    /// Build the shape for a tool from the drag origin and current pointer.
    ///
    /// `trail` is the freehand path accumulated so far and is only used by
    /// brush and eraser.
    pub fn for_tool(tool: ToolKind, origin: Point, current: Point, trail: &[Point]) -> Self {
        match tool {
            ToolKind::Brush | ToolKind::Eraser => OverlayShape::Path {
                points: trail.to_vec(),
            },
            ToolKind::Rectangle => OverlayShape::Rectangle {
                rect: Rect::from_points(origin, current),
            },
            ToolKind::Circle => OverlayShape::Circle {
                center: origin,
                radius: origin.distance(current),
            },
            ToolKind::Triangle => OverlayShape::Triangle {
                vertices: [
                    origin,
                    current,
                    Point::new(2.0 * origin.x - current.x, current.y),
                ],
            },
            ToolKind::Line => OverlayShape::Line {
                start: origin,
                end: current,
            },
            // The star ignores the drag vector entirely.
            ToolKind::Star => OverlayShape::Star { center: current },
        }
    }

    /// Outline of the shape.
    pub fn to_path(&self) -> BezPath {
        match self {
            OverlayShape::Path { points } => polyline(points),
            OverlayShape::Rectangle { rect } => rect.to_path(PATH_TOLERANCE),
            OverlayShape::Circle { center, radius } => {
                Circle::new(*center, *radius).to_path(PATH_TOLERANCE)
            }
            OverlayShape::Triangle { vertices } => {
                let mut path = polyline(vertices);
                path.close_path();
                path
            }
            OverlayShape::Line { start, end } => polyline(&[*start, *end]),
            OverlayShape::Star { center } => star_path(*center),
        }
    }
}

/// A shape together with the paint it is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub shape: OverlayShape,
    pub paint: Paint,
}

impl Overlay {
    pub fn new(shape: OverlayShape, paint: Paint) -> Self {
        Self { shape, paint }
    }

    /// Build the overlay for the current tool settings.
    ///
    /// Eraser strokes use `background` instead of the active color. The fill
    /// flag only applies to closed shapes; paths, lines and stars are always
    /// stroked.
    pub fn from_settings(
        settings: &ToolSettings,
        background: Rgba8,
        origin: Point,
        current: Point,
        trail: &[Point],
    ) -> Self {
        let shape = OverlayShape::for_tool(settings.tool, origin, current, trail);
        let color = if settings.tool == ToolKind::Eraser {
            background
        } else {
            settings.color
        };
        let paint = if settings.fill && settings.tool.supports_fill() {
            Paint::fill(color)
        } else {
            Paint::stroke(color, settings.width)
        };
        Self { shape, paint }
    }

    pub fn to_path(&self) -> BezPath {
        self.shape.to_path()
    }
}

fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
    }
    path
}

/// Star outline alternating outer and inner vertices, first tip pointing up.
fn star_path(center: Point) -> BezPath {
    let step = PI / STAR_POINTS as f64;
    let vertex = |angle: f64, radius: f64| {
        Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
    };

    let mut rotation = PI / 2.0 * 3.0;
    let mut path = BezPath::new();
    path.move_to(vertex(rotation, STAR_OUTER_RADIUS));
    for _ in 0..STAR_POINTS {
        rotation += step;
        path.line_to(vertex(rotation, STAR_INNER_RADIUS));
        rotation += step;
        path.line_to(vertex(rotation, STAR_OUTER_RADIUS));
    }
    path.close_path();
    path
}
