//! Draw session state machine (Idle -> Drawing -> Idle).

use crate::color::Rgba8;
use crate::overlay::Overlay;
use crate::snapshot::Snapshot;
use crate::tools::ToolSettings;
use kurbo::Point;

/// Transient state of one pointer gesture.
#[derive(Debug, Clone)]
pub struct DrawSession {
    /// Pointer-down position.
    pub origin: Point,
    /// Canvas contents at pointer-down; restored before every preview frame.
    pub reference: Snapshot,
    /// Tool and style frozen at pointer-down.
    pub settings: ToolSettings,
    /// Canvas background, used by the eraser.
    pub background: Rgba8,
    /// Freehand points accumulated so far (brush and eraser only).
    trail: Vec<Point>,
    /// Most recent pointer position.
    current: Point,
}

impl DrawSession {
    pub fn new(
        origin: Point,
        reference: Snapshot,
        settings: ToolSettings,
        background: Rgba8,
    ) -> Self {
        let trail = if settings.tool.is_freehand() {
            vec![origin]
        } else {
            Vec::new()
        };
        Self {
            origin,
            reference,
            settings,
            background,
            trail,
            current: origin,
        }
    }

    /// Most recent pointer position.
    pub fn current(&self) -> Point {
        self.current
    }

    /// Freehand points accumulated so far.
    pub fn trail(&self) -> &[Point] {
        &self.trail
    }

    /// Advance the gesture to `point` and return the overlay to draw.
    pub fn advance(&mut self, point: Point) -> Overlay {
        self.current = point;
        if self.settings.tool.is_freehand() && self.trail.last() != Some(&point) {
            self.trail.push(point);
        }
        self.overlay()
    }

    /// Overlay for the current pointer position.
    pub fn overlay(&self) -> Overlay {
        Overlay::from_settings(
            &self.settings,
            self.background,
            self.origin,
            self.current,
            &self.trail,
        )
    }
}

/// State of the stroke renderer.
#[derive(Debug, Clone, Default)]
pub enum StrokeState {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// A gesture is in progress.
    Drawing(DrawSession),
}

impl StrokeState {
    /// Start a gesture, replacing any previous session.
    pub fn begin(&mut self, session: DrawSession) {
        log::debug!(
            "Begin {} stroke at ({}, {})",
            session.settings.tool,
            session.origin.x,
            session.origin.y
        );
        *self = StrokeState::Drawing(session);
    }

    /// Advance the active gesture.
    ///
    /// Returns the reference snapshot to restore and the overlay to draw on
    /// top of it, or `None` when idle.
    pub fn advance(&mut self, point: Point) -> Option<(&Snapshot, Overlay)> {
        match self {
            StrokeState::Idle => None,
            StrokeState::Drawing(session) => {
                let overlay = session.advance(point);
                Some((&session.reference, overlay))
            }
        }
    }

    /// End the gesture and hand back its session, if any.
    pub fn finish(&mut self) -> Option<DrawSession> {
        match std::mem::take(self) {
            StrokeState::Idle => None,
            StrokeState::Drawing(session) => Some(session),
        }
    }

    /// Check if a gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self, StrokeState::Drawing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlayShape;
    use crate::tools::ToolKind;

    fn blank() -> Snapshot {
        Snapshot::solid(8, 8, Rgba8::WHITE).unwrap()
    }

    fn settings(tool: ToolKind) -> ToolSettings {
        ToolSettings {
            tool,
            ..ToolSettings::default()
        }
    }

    #[test]
    fn test_idle_advance_is_noop() {
        let mut state = StrokeState::default();
        assert!(!state.is_drawing());
        assert!(state.advance(Point::new(1.0, 1.0)).is_none());
        assert!(state.finish().is_none());
    }

    #[test]
    fn test_session_lifecycle() {
        let mut state = StrokeState::default();
        let reference = blank();
        state.begin(DrawSession::new(
            Point::new(1.0, 1.0),
            reference.clone(),
            settings(ToolKind::Line),
            Rgba8::WHITE,
        ));
        assert!(state.is_drawing());

        let (restored, overlay) = state.advance(Point::new(5.0, 6.0)).unwrap();
        assert!(restored.ptr_eq(&reference));
        assert_eq!(
            overlay.shape,
            OverlayShape::Line {
                start: Point::new(1.0, 1.0),
                end: Point::new(5.0, 6.0)
            }
        );

        let session = state.finish().unwrap();
        assert_eq!(session.current(), Point::new(5.0, 6.0));
        assert!(!state.is_drawing());
    }

    #[test]
    fn test_brush_trail_accumulates() {
        let mut session =
            DrawSession::new(Point::ZERO, blank(), settings(ToolKind::Brush), Rgba8::WHITE);
        session.advance(Point::new(1.0, 0.0));
        session.advance(Point::new(1.0, 0.0));
        let overlay = session.advance(Point::new(2.0, 1.0));
        assert_eq!(session.trail().len(), 3);
        assert_eq!(
            overlay.shape,
            OverlayShape::Path {
                points: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 1.0)]
            }
        );
    }

    #[test]
    fn test_shape_tools_keep_no_trail() {
        let mut session =
            DrawSession::new(Point::ZERO, blank(), settings(ToolKind::Circle), Rgba8::WHITE);
        session.advance(Point::new(3.0, 4.0));
        assert!(session.trail().is_empty());
    }

    #[test]
    fn test_settings_frozen_at_begin() {
        let mut live = settings(ToolKind::Rectangle);
        let session = DrawSession::new(Point::ZERO, blank(), live.clone(), Rgba8::WHITE);
        live.set_color(Rgba8::opaque(0, 255, 0));
        assert_eq!(session.overlay().paint.color, Rgba8::BLACK);
    }
}
