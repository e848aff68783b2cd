//! Rasterpad Core Library
//!
//! Platform-agnostic data model for the Rasterpad drawing canvas: colors,
//! raster snapshots, undo/redo history, tools, overlay geometry and the
//! draw session state machine.

pub mod color;
pub mod config;
pub mod history;
pub mod input;
pub mod overlay;
pub mod session;
pub mod snapshot;
pub mod tools;

pub use color::{ColorParseError, Rgba8};
pub use config::{AppConfig, ConfigError};
pub use history::History;
pub use input::{ExportFormat, InputEvent};
pub use overlay::{
    Overlay, OverlayShape, Paint, PaintMode, STAR_INNER_RADIUS, STAR_OUTER_RADIUS, STAR_POINTS,
};
pub use session::{DrawSession, StrokeState};
pub use snapshot::{Snapshot, SnapshotError};
pub use tools::{ToolKind, ToolParseError, ToolSettings};
