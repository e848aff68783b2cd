//! Replayable input scripts.
//!
//! A script is a JSON array of [`InputEvent`]s, plus a convenience step that
//! reads an image file from disk and feeds it in as `image-file-selected`:
//!
//! ```json
//! [
//!   { "type": "tool-selected", "tool": "rectangle" },
//!   { "type": "pointer-down", "x": 10, "y": 10 },
//!   { "type": "pointer-move", "x": 80, "y": 60 },
//!   { "type": "pointer-up" },
//!   { "load_image": "photo.png" },
//!   { "type": "export-requested", "format": "png" }
//! ]
//! ```

use crate::app::{AppResult, ExportedFile, Sketchpad};
use rasterpad_core::input::InputEvent;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    /// Read an image file, relative to the script's directory.
    LoadImage { load_image: PathBuf },
    Event(InputEvent),
}

/// A sequence of steps replayed against a [`Sketchpad`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let script = Self::from_json(&json)?;
        log::info!("Loaded {} script steps from {:?}", script.steps.len(), path);
        Ok(script)
    }

    /// Replay every step. Returns the files produced by export requests.
    pub fn run(&self, pad: &mut Sketchpad, base_dir: &Path) -> AppResult<Vec<ExportedFile>> {
        let mut exports = Vec::new();
        for step in &self.steps {
            let event = match step {
                ScriptStep::Event(event) => event.clone(),
                ScriptStep::LoadImage { load_image } => {
                    let path = base_dir.join(load_image);
                    log::debug!("Reading image {:?}", path);
                    InputEvent::ImageFileSelected {
                        bytes: std::fs::read(&path)?,
                    }
                }
            };
            if let Some(file) = pad.handle(event)? {
                exports.push(file);
            }
        }
        Ok(exports)
    }
}
