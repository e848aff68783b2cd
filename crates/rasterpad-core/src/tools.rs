//! Tool selection and the style applied to new strokes.

use crate::color::Rgba8;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned for an unknown tool identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool: {0}")]
pub struct ToolParseError(pub String);

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Rectangle,
    Circle,
    Triangle,
    Line,
    Star,
}

impl ToolKind {
    /// All tools in toolbar order.
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Triangle,
        ToolKind::Line,
        ToolKind::Star,
    ];

    /// Identifier used by the host toolbar.
    pub fn id(self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Eraser => "eraser",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Triangle => "triangle",
            ToolKind::Line => "line",
            ToolKind::Star => "star",
        }
    }

    /// Whether the tool accumulates a freehand path.
    pub fn is_freehand(self) -> bool {
        matches!(self, ToolKind::Brush | ToolKind::Eraser)
    }

    /// Whether the fill flag has any effect on this tool.
    pub fn supports_fill(self) -> bool {
        matches!(self, ToolKind::Rectangle | ToolKind::Circle | ToolKind::Triangle)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ToolKind {
    type Err = ToolParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| ToolParseError(id.to_string()))
    }
}

/// Current tool plus the style applied to new strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Currently selected tool.
    pub tool: ToolKind,
    /// Active drawing color.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub width: f64,
    /// Fill shapes instead of stroking their outline.
    pub fill: bool,
}

impl ToolSettings {
    pub const DEFAULT_WIDTH: f64 = 5.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: Rgba8) {
        self.color = color;
    }

    /// Set the stroke width.
    ///
    /// Returns false and keeps the old width if `width` is not a positive
    /// finite number.
    pub fn set_width(&mut self, width: f64) -> bool {
        if width.is_finite() && width > 0.0 {
            self.width = width;
            true
        } else {
            false
        }
    }

    pub fn set_fill(&mut self, fill: bool) {
        self.fill = fill;
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            color: Rgba8::BLACK,
            width: Self::DEFAULT_WIDTH,
            fill: false,
        }
    }
}
