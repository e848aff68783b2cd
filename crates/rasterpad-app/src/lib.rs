//! Rasterpad Application
//!
//! The application state that consumes host input events, plus the
//! keyboard shortcut registry, the replay driver used by the native
//! binary and the WebAssembly bindings for a browser host.

mod app;
mod script;
mod shortcuts;

#[cfg(feature = "native")]
pub mod cli;

pub use app::{AppError, AppResult, ExportedFile, Sketchpad};
pub use script::{Script, ScriptStep};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebSketchpad;
