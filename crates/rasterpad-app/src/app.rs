//! Core application state and event dispatch.

use kurbo::Point;
use rasterpad_core::color::{ColorParseError, Rgba8};
use rasterpad_core::config::{AppConfig, ConfigError};
use rasterpad_core::history::History;
use rasterpad_core::input::{ExportFormat, InputEvent};
use rasterpad_core::session::{DrawSession, StrokeState};
use rasterpad_core::snapshot::Snapshot;
use rasterpad_core::tools::{ToolKind, ToolParseError, ToolSettings};
use rasterpad_render::{
    ExportError, ExportOptions, ImportError, RasterSurface, RendererError, decode_for_canvas,
    encode, straight_rgba,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::shortcuts::ShortcutAction;

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Color(#[from] ColorParseError),
    #[error(transparent)]
    Tool(#[from] ToolParseError),
    #[error("Invalid stroke width: {0}")]
    InvalidWidth(f64),
    #[error("Cannot import an image while a stroke is in progress")]
    Busy,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
}

impl AppError {
    /// Errors caused by bad host input. These are dropped with a warning
    /// instead of being surfaced to the host.
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            AppError::Import(_)
                | AppError::Color(_)
                | AppError::Tool(_)
                | AppError::InvalidWidth(_)
                | AppError::Busy
        )
    }
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// An encoded export ready to be saved or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub format: ExportFormat,
    /// Suggested file name, `<unix-millis>.<ext>`.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    fn new(format: ExportFormat, bytes: Vec<u8>) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        Self {
            format,
            file_name: format!("{}.{}", millis, format.extension()),
            bytes,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Write the file into `dir` under its suggested name.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// The drawing application: tool settings, canvas raster, undo/redo history
/// and the in-progress stroke, owned in one place and driven by
/// [`InputEvent`]s.
pub struct Sketchpad {
    config: AppConfig,
    settings: ToolSettings,
    surface: RasterSurface,
    history: History,
    stroke: StrokeState,
}

impl Sketchpad {
    /// Create a canvas filled with the background color and record it as
    /// the first history entry.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        let surface = RasterSurface::new(config.width, config.height, config.background)?;
        let mut pad = Self {
            settings: config.tool_settings(),
            config,
            surface,
            history: History::new(),
            stroke: StrokeState::Idle,
        };
        pad.commit()?;
        log::info!("Created {}x{} canvas", pad.config.width, pad.config.height);
        Ok(pad)
    }

    /// Apply one host event.
    ///
    /// Invalid host input (unknown tool, bad color, unreadable image) is
    /// logged and ignored. Returns the encoded file for export requests.
    pub fn handle(&mut self, event: InputEvent) -> AppResult<Option<ExportedFile>> {
        match self.apply(event) {
            Err(e) if e.is_ignorable() => {
                log::warn!("Ignoring input: {}", e);
                Ok(None)
            }
            other => other,
        }
    }

    fn apply(&mut self, event: InputEvent) -> AppResult<Option<ExportedFile>> {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Point::new(x, y))?,
            InputEvent::PointerMove { x, y } => {
                self.pointer_move(Point::new(x, y))?;
            }
            InputEvent::PointerUp => {
                self.pointer_up()?;
            }
            InputEvent::ToolSelected { tool } => self.select_tool(tool.parse()?),
            InputEvent::ColorSelected { color } => self.settings.set_color(color.parse()?),
            InputEvent::WidthChanged { width } => {
                if !self.settings.set_width(width) {
                    return Err(AppError::InvalidWidth(width));
                }
            }
            InputEvent::FillToggled { fill } => self.settings.set_fill(fill),
            InputEvent::ClearRequested => self.clear()?,
            InputEvent::UndoRequested => {
                self.undo()?;
            }
            InputEvent::RedoRequested => {
                self.redo()?;
            }
            InputEvent::ExportRequested { format } => return self.export(format).map(Some),
            InputEvent::ImageFileSelected { bytes } => self.import_image(&bytes)?,
        }
        Ok(None)
    }

    /// Apply a keyboard shortcut.
    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> AppResult<Option<ExportedFile>> {
        match action {
            ShortcutAction::Undo => self.handle(InputEvent::UndoRequested),
            ShortcutAction::Redo => self.handle(InputEvent::RedoRequested),
            ShortcutAction::Export(format) => self.handle(InputEvent::ExportRequested { format }),
            ShortcutAction::Clear => self.handle(InputEvent::ClearRequested),
            ShortcutAction::Tool(tool) => {
                self.select_tool(tool);
                Ok(None)
            }
            ShortcutAction::ToggleFill => {
                let fill = !self.settings.fill;
                self.handle(InputEvent::FillToggled { fill })
            }
            ShortcutAction::Cancel => {
                self.cancel()?;
                Ok(None)
            }
        }
    }

    /// Start a stroke at `origin`.
    pub fn pointer_down(&mut self, origin: Point) -> AppResult<()> {
        let reference = self.surface.capture()?;
        self.stroke.begin(DrawSession::new(
            origin,
            reference,
            self.settings.clone(),
            self.config.background,
        ));
        Ok(())
    }

    /// Redraw the live preview for the pointer at `point`.
    ///
    /// Returns false when no stroke is in progress.
    pub fn pointer_move(&mut self, point: Point) -> AppResult<bool> {
        let Some((reference, overlay)) = self.stroke.advance(point) else {
            return Ok(false);
        };
        self.surface.restore(reference)?;
        self.surface.draw(&overlay);
        Ok(true)
    }

    /// Finish the stroke and commit the canvas to history.
    ///
    /// Returns false when no stroke is in progress.
    pub fn pointer_up(&mut self) -> AppResult<bool> {
        let Some(session) = self.stroke.finish() else {
            return Ok(false);
        };
        log::debug!("Commit {} stroke", session.settings.tool);
        self.commit()?;
        Ok(true)
    }

    /// Abandon the stroke in progress and restore the canvas.
    pub fn cancel(&mut self) -> AppResult<bool> {
        let Some(session) = self.stroke.finish() else {
            return Ok(false);
        };
        self.surface.restore(&session.reference)?;
        log::debug!("Cancelled {} stroke", session.settings.tool);
        Ok(true)
    }

    /// Undo the last change, abandoning any stroke in progress.
    ///
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> AppResult<bool> {
        // Drop any preview so it never reaches the history stacks
        self.cancel()?;
        if !self.history.can_undo() {
            return Ok(false);
        }
        let current = self.surface.capture()?;
        match self.history.undo(current) {
            Some(snapshot) => {
                self.surface.restore(&snapshot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Redo the last undone change, abandoning any stroke in progress.
    ///
    /// Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> AppResult<bool> {
        // Drop any preview so it never reaches the history stacks
        self.cancel()?;
        if !self.history.can_redo() {
            return Ok(false);
        }
        let current = self.surface.capture()?;
        match self.history.redo(current) {
            Some(snapshot) => {
                self.surface.restore(&snapshot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Wipe the canvas to the background color and commit.
    pub fn clear(&mut self) -> AppResult<()> {
        self.cancel()?;
        self.surface.fill(self.config.background);
        self.commit()
    }

    /// Replace the canvas with an image stretched to the canvas size.
    ///
    /// The image is fully decoded before the canvas is touched, so an
    /// unreadable file leaves canvas and history unchanged.
    pub fn import_image(&mut self, bytes: &[u8]) -> AppResult<()> {
        if self.stroke.is_drawing() {
            return Err(AppError::Busy);
        }
        let (width, height) = (self.surface.width(), self.surface.height());
        let rgba = decode_for_canvas(bytes, width, height)?;
        self.surface.fill(self.config.background);
        self.surface.draw_rgba_image(width, height, &rgba)?;
        self.commit()?;
        log::info!("Imported image ({} bytes)", bytes.len());
        Ok(())
    }

    /// Encode the current canvas.
    pub fn export(&self, format: ExportFormat) -> AppResult<ExportedFile> {
        let snapshot = self.surface.capture()?;
        let options = ExportOptions {
            background: self.config.background,
            jpeg_quality: self.config.jpeg_quality,
        };
        let bytes = encode(&snapshot, format, &options)?;
        Ok(ExportedFile::new(format, bytes))
    }

    pub fn select_tool(&mut self, tool: ToolKind) {
        self.settings.set_tool(tool);
    }

    fn commit(&mut self) -> AppResult<()> {
        let snapshot = self.surface.capture()?;
        self.history.push_snapshot(snapshot);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_drawing()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Copy of the current canvas.
    pub fn snapshot(&self) -> AppResult<Snapshot> {
        Ok(self.surface.capture()?)
    }

    /// Current canvas as straight-alpha RGBA8, ready for an HTML `ImageData`.
    pub fn rgba_pixels(&self) -> AppResult<Vec<u8>> {
        Ok(straight_rgba(&self.surface.capture()?))
    }

    /// Read a canvas pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.surface.pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterpad_core::overlay::STAR_OUTER_RADIUS;

    const RED: Rgba8 = Rgba8::opaque(255, 0, 0);

    fn pad() -> Sketchpad {
        Sketchpad::new(AppConfig {
            width: 200,
            height: 200,
            ..AppConfig::default()
        })
        .unwrap()
    }

    fn drag(pad: &mut Sketchpad, from: (f64, f64), to: (f64, f64)) {
        pad.handle(InputEvent::PointerDown { x: from.0, y: from.1 }).unwrap();
        pad.handle(InputEvent::PointerMove { x: to.0, y: to.1 }).unwrap();
        pad.handle(InputEvent::PointerUp).unwrap();
    }

    fn select(pad: &mut Sketchpad, tool: &str) {
        pad.handle(InputEvent::ToolSelected { tool: tool.into() }).unwrap();
    }

    #[test]
    fn test_initial_state() {
        let pad = pad();
        assert_eq!(pad.history().undo_len(), 1);
        assert!(pad.can_undo());
        assert!(!pad.can_redo());
        assert!(!pad.is_drawing());
        assert_eq!(pad.pixel(0, 0), Some(Rgba8::WHITE));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AppConfig {
            width: 0,
            ..AppConfig::default()
        };
        assert!(matches!(Sketchpad::new(config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_line_scenario() {
        let mut pad = pad();
        select(&mut pad, "line");
        let before = pad.snapshot().unwrap();
        let depth = pad.history().undo_len();

        drag(&mut pad, (10.0, 10.0), (50.0, 50.0));

        assert_eq!(pad.history().undo_len(), depth + 1);
        let top = pad.history().peek_undo().unwrap().clone();
        assert_ne!(top, before);
        assert_eq!(top, pad.snapshot().unwrap());

        // On the segment
        for t in [15u32, 30, 45] {
            assert_ne!(pad.pixel(t, t), Some(Rgba8::WHITE));
        }
        // Off the segment, and beyond its ends
        assert_eq!(pad.pixel(40, 15), Some(Rgba8::WHITE));
        assert_eq!(pad.pixel(15, 40), Some(Rgba8::WHITE));
        assert_eq!(pad.pixel(60, 60), Some(Rgba8::WHITE));
        assert_eq!(pad.pixel(3, 3), Some(Rgba8::WHITE));
    }

    #[test]
    fn test_preview_does_not_compound() {
        let mut pad = pad();
        select(&mut pad, "rectangle");
        pad.handle(InputEvent::PointerDown { x: 10.0, y: 10.0 }).unwrap();
        for i in 0..20 {
            let x = 100.0 + i as f64;
            pad.handle(InputEvent::PointerMove { x, y: 100.0 }).unwrap();
        }
        pad.handle(InputEvent::PointerMove { x: 60.0, y: 60.0 }).unwrap();
        let live = pad.snapshot().unwrap();
        pad.handle(InputEvent::PointerUp).unwrap();

        let mut fresh = self::pad();
        select(&mut fresh, "rectangle");
        drag(&mut fresh, (10.0, 10.0), (60.0, 60.0));
        assert_eq!(live, fresh.snapshot().unwrap());
        // No history entries for intermediate frames
        assert_eq!(pad.history().undo_len(), 2);
    }

    #[test]
    fn test_stroked_rectangle_hollow() {
        let mut pad = pad();
        select(&mut pad, "rectangle");
        pad.handle(InputEvent::ColorSelected { color: "#ff0000".into() }).unwrap();
        drag(&mut pad, (20.0, 20.0), (120.0, 100.0));
        assert_eq!(pad.pixel(70, 60), Some(Rgba8::WHITE));
        assert_eq!(pad.pixel(20, 60), Some(RED));
    }

    #[test]
    fn test_filled_shapes() {
        let mut pad = pad();
        pad.handle(InputEvent::ColorSelected { color: "rgb(255, 0, 0)".into() }).unwrap();
        pad.handle(InputEvent::FillToggled { fill: true }).unwrap();

        select(&mut pad, "rectangle");
        drag(&mut pad, (10.0, 10.0), (60.0, 60.0));
        assert_eq!(pad.pixel(35, 35), Some(RED));

        select(&mut pad, "circle");
        drag(&mut pad, (150.0, 50.0), (170.0, 50.0));
        assert_eq!(pad.pixel(150, 50), Some(RED));
        assert_eq!(pad.pixel(150, 80), Some(Rgba8::WHITE));

        select(&mut pad, "triangle");
        drag(&mut pad, (100.0, 120.0), (130.0, 180.0));
        assert_eq!(pad.pixel(100, 170), Some(RED));
        assert_eq!(pad.pixel(75, 130), Some(Rgba8::WHITE));
    }

    #[test]
    fn test_star_ignores_drag() {
        let mut short = pad();
        select(&mut short, "star");
        drag(&mut short, (95.0, 100.0), (100.0, 100.0));

        let mut long = pad();
        select(&mut long, "star");
        drag(&mut long, (100.0, 600.0), (100.0, 100.0));

        assert_eq!(short.snapshot().unwrap(), long.snapshot().unwrap());
        // Top tip sits at the outer radius above the pointer
        assert_ne!(short.pixel(100, (100.0 - STAR_OUTER_RADIUS) as u32), Some(Rgba8::WHITE));
    }

    #[test]
    fn test_brush_and_eraser() {
        let mut pad = pad();
        pad.handle(InputEvent::WidthChanged { width: 10.0 }).unwrap();
        pad.handle(InputEvent::PointerDown { x: 20.0, y: 100.0 }).unwrap();
        pad.handle(InputEvent::PointerMove { x: 60.0, y: 100.0 }).unwrap();
        pad.handle(InputEvent::PointerMove { x: 100.0, y: 100.0 }).unwrap();
        pad.handle(InputEvent::PointerUp).unwrap();
        // The whole path survives each restore, not just the last segment
        assert_eq!(pad.pixel(40, 100), Some(Rgba8::BLACK));
        assert_eq!(pad.pixel(80, 100), Some(Rgba8::BLACK));

        select(&mut pad, "eraser");
        pad.handle(InputEvent::WidthChanged { width: 20.0 }).unwrap();
        drag(&mut pad, (30.0, 100.0), (90.0, 100.0));
        assert_eq!(pad.pixel(40, 100), Some(Rgba8::WHITE));
        assert_eq!(pad.pixel(80, 100), Some(Rgba8::WHITE));
    }

    #[test]
    fn test_move_without_down_is_noop() {
        let mut pad = pad();
        let before = pad.snapshot().unwrap();
        assert!(!pad.pointer_move(Point::new(50.0, 50.0)).unwrap());
        assert!(!pad.pointer_up().unwrap());
        assert_eq!(pad.snapshot().unwrap(), before);
        assert_eq!(pad.history().undo_len(), 1);
    }

    #[test]
    fn test_redo_on_empty_stack_is_noop() {
        let mut pad = pad();
        select(&mut pad, "line");
        for i in 0..4 {
            let y = 20.0 + 30.0 * i as f64;
            drag(&mut pad, (10.0, y), (150.0, y));
        }
        let before = pad.snapshot().unwrap();
        let depth = pad.history().undo_len();
        pad.handle(InputEvent::RedoRequested).unwrap();
        assert_eq!(pad.snapshot().unwrap(), before);
        assert_eq!(pad.history().undo_len(), depth);
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut pad = pad();
        select(&mut pad, "circle");
        drag(&mut pad, (100.0, 100.0), (130.0, 100.0));
        drag(&mut pad, (40.0, 40.0), (50.0, 40.0));

        for _ in 0..3 {
            let before = pad.snapshot().unwrap();
            pad.handle(InputEvent::UndoRequested).unwrap();
            pad.handle(InputEvent::RedoRequested).unwrap();
            assert_eq!(pad.snapshot().unwrap().data(), before.data());
            pad.handle(InputEvent::UndoRequested).unwrap();
        }
    }

    #[test]
    fn test_undo_walks_back_to_blank() {
        let mut pad = pad();
        let blank = pad.snapshot().unwrap();
        select(&mut pad, "line");
        drag(&mut pad, (10.0, 10.0), (190.0, 190.0));

        while pad.can_undo() {
            pad.handle(InputEvent::UndoRequested).unwrap();
        }
        assert_eq!(pad.snapshot().unwrap(), blank);
        // Undo with an empty stack changes nothing
        assert!(!pad.undo().unwrap());
        assert_eq!(pad.snapshot().unwrap(), blank);
    }

    #[test]
    fn test_commit_after_undo_discards_redo() {
        let mut pad = pad();
        select(&mut pad, "line");
        drag(&mut pad, (10.0, 10.0), (100.0, 10.0));
        drag(&mut pad, (10.0, 30.0), (100.0, 30.0));
        pad.handle(InputEvent::UndoRequested).unwrap();
        pad.handle(InputEvent::UndoRequested).unwrap();
        assert!(pad.can_redo());

        drag(&mut pad, (10.0, 50.0), (100.0, 50.0));
        assert!(!pad.can_redo());
    }

    #[test]
    fn test_undo_mid_stroke_keeps_history() {
        let mut pad = pad();
        let blank = pad.snapshot().unwrap();
        select(&mut pad, "line");

        pad.handle(InputEvent::PointerDown { x: 10.0, y: 10.0 }).unwrap();
        pad.handle(InputEvent::PointerMove { x: 90.0, y: 90.0 }).unwrap();
        pad.apply_shortcut(ShortcutAction::Undo).unwrap();
        assert!(!pad.is_drawing());
        assert_eq!(pad.snapshot().unwrap(), blank);

        pad.handle(InputEvent::PointerMove { x: 120.0, y: 40.0 }).unwrap();
        pad.handle(InputEvent::PointerUp).unwrap();
        assert_eq!(pad.snapshot().unwrap(), blank);

        // The redo entry is the blank canvas, not the abandoned preview
        assert_eq!(pad.history().peek_redo(), Some(&blank));
        pad.handle(InputEvent::RedoRequested).unwrap();
        assert_eq!(pad.snapshot().unwrap(), blank);
        while pad.can_undo() {
            pad.handle(InputEvent::UndoRequested).unwrap();
        }
        assert_eq!(pad.snapshot().unwrap(), blank);
    }

    #[test]
    fn test_redo_mid_stroke_drops_preview() {
        let mut pad = pad();
        select(&mut pad, "line");
        drag(&mut pad, (10.0, 10.0), (100.0, 10.0));
        let drawn = pad.snapshot().unwrap();
        pad.handle(InputEvent::UndoRequested).unwrap();
        assert!(pad.can_redo());

        pad.handle(InputEvent::PointerDown { x: 10.0, y: 150.0 }).unwrap();
        pad.handle(InputEvent::PointerMove { x: 150.0, y: 150.0 }).unwrap();
        pad.apply_shortcut(ShortcutAction::Redo).unwrap();
        assert!(!pad.is_drawing());
        assert_eq!(pad.snapshot().unwrap(), drawn);
        assert_eq!(pad.pixel(80, 150), Some(Rgba8::WHITE));
    }

    #[test]
    fn test_clear_commits_background() {
        let mut pad = pad();
        select(&mut pad, "line");
        drag(&mut pad, (10.0, 10.0), (100.0, 100.0));
        let depth = pad.history().undo_len();

        pad.handle(InputEvent::ClearRequested).unwrap();
        assert_eq!(pad.snapshot().unwrap(), Snapshot::solid(200, 200, Rgba8::WHITE).unwrap());
        assert_eq!(pad.history().undo_len(), depth + 1);
    }

    #[test]
    fn test_cancel_restores_reference() {
        let mut pad = pad();
        let before = pad.snapshot().unwrap();
        pad.handle(InputEvent::PointerDown { x: 10.0, y: 10.0 }).unwrap();
        pad.handle(InputEvent::PointerMove { x: 90.0, y: 90.0 }).unwrap();
        assert_ne!(pad.snapshot().unwrap(), before);

        pad.apply_shortcut(ShortcutAction::Cancel).unwrap();
        assert!(!pad.is_drawing());
        assert_eq!(pad.snapshot().unwrap(), before);
        assert_eq!(pad.history().undo_len(), 1);
    }

    #[test]
    fn test_invalid_input_ignored() {
        let mut pad = pad();
        let settings = pad.settings().clone();
        pad.handle(InputEvent::ToolSelected { tool: "lasso".into() }).unwrap();
        pad.handle(InputEvent::ColorSelected { color: "not-a-color".into() }).unwrap();
        pad.handle(InputEvent::WidthChanged { width: -4.0 }).unwrap();
        assert_eq!(pad.settings(), &settings);
    }

    #[test]
    fn test_invalid_image_leaves_canvas() {
        let mut pad = pad();
        let before = pad.snapshot().unwrap();
        let result = pad
            .handle(InputEvent::ImageFileSelected { bytes: b"garbage".to_vec() })
            .unwrap();
        assert!(result.is_none());
        assert_eq!(pad.snapshot().unwrap(), before);
        assert_eq!(pad.history().undo_len(), 1);
    }

    #[test]
    fn test_import_image_commits() {
        use image::{ImageFormat, Rgba, RgbaImage};
        use std::io::Cursor;

        let img = RgbaImage::from_pixel(20, 10, Rgba([0, 0, 255, 255]));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();

        let mut pad = pad();
        pad.handle(InputEvent::ImageFileSelected { bytes: bytes.into_inner() }).unwrap();
        for (x, y) in [(5, 5), (195, 195)] {
            let px = pad.pixel(x, y).unwrap();
            assert!(px.r <= 1 && px.g <= 1 && px.b >= 254, "got {:?}", px);
        }
        assert_eq!(pad.history().undo_len(), 2);
    }

    #[test]
    fn test_import_rejected_while_drawing() {
        let mut pad = pad();
        pad.pointer_down(Point::new(1.0, 1.0)).unwrap();
        assert!(matches!(pad.import_image(&[1, 2, 3]), Err(AppError::Busy)));
        assert!(pad.is_drawing());
    }

    #[test]
    fn test_export_request() {
        let mut pad = pad();
        let file = pad
            .handle(InputEvent::ExportRequested { format: ExportFormat::Png })
            .unwrap()
            .unwrap();
        assert!(file.file_name.ends_with(".png"));
        assert_eq!(file.mime_type(), "image/png");
        let decoded = image::load_from_memory(&file.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 200));

        let svg = pad.export(ExportFormat::Svg).unwrap();
        assert!(svg.file_name.ends_with(".svg"));
        assert!(String::from_utf8(svg.bytes).unwrap().contains("data:image/png;base64,"));
    }

    #[test]
    fn test_rgba_pixels() {
        let pad = pad();
        let pixels = pad.rgba_pixels().unwrap();
        assert_eq!(pixels.len(), 200 * 200 * 4);
        assert_eq!(&pixels[..4], &[255, 255, 255, 255]);
    }
}
