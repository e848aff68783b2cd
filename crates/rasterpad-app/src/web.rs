//! WebAssembly bindings for a browser host.
//!
//! The page owns the `<canvas>` element and forwards pointer, toolbar and
//! keyboard input here; after each call it blits the raster back with
//! [`WebSketchpad::blit`].

use crate::app::{AppError, Sketchpad};
use crate::shortcuts::{ShortcutAction, ShortcutRegistry};
use kurbo::Point;
use rasterpad_core::config::AppConfig;
use rasterpad_core::input::{ExportFormat, InputEvent};
use wasm_bindgen::Clamped;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, ImageData};

fn to_js(e: AppError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Initialize logging and the panic hook.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Starting Rasterpad (WASM)");
}

/// Drawing canvas handle exposed to JavaScript.
#[wasm_bindgen]
pub struct WebSketchpad {
    pad: Sketchpad,
}

#[wasm_bindgen]
impl WebSketchpad {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<WebSketchpad, JsValue> {
        let config = AppConfig {
            width,
            height,
            ..AppConfig::default()
        };
        Ok(Self {
            pad: Sketchpad::new(config).map_err(to_js)?,
        })
    }

    /// Create from a JSON configuration.
    pub fn with_config(json: &str) -> Result<WebSketchpad, JsValue> {
        let config = AppConfig::from_json(json).map_err(|e| to_js(e.into()))?;
        Ok(Self {
            pad: Sketchpad::new(config).map_err(to_js)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.pad.width()
    }

    pub fn height(&self) -> u32 {
        self.pad.height()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.pad.pointer_down(Point::new(x, y)).map_err(to_js)
    }

    /// Returns true when the preview was redrawn.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        self.pad.pointer_move(Point::new(x, y)).map_err(to_js)
    }

    /// Returns true when a stroke was committed.
    pub fn pointer_up(&mut self) -> Result<bool, JsValue> {
        self.pad.pointer_up().map_err(to_js)
    }

    pub fn select_tool(&mut self, tool: &str) -> Result<(), JsValue> {
        self.dispatch(InputEvent::ToolSelected { tool: tool.into() })
    }

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()` and `rgba()`.
    pub fn select_color(&mut self, color: &str) -> Result<(), JsValue> {
        self.dispatch(InputEvent::ColorSelected { color: color.into() })
    }

    pub fn set_width(&mut self, width: f64) -> Result<(), JsValue> {
        self.dispatch(InputEvent::WidthChanged { width })
    }

    pub fn set_fill(&mut self, fill: bool) -> Result<(), JsValue> {
        self.dispatch(InputEvent::FillToggled { fill })
    }

    pub fn clear(&mut self) -> Result<(), JsValue> {
        self.pad.clear().map_err(to_js)
    }

    pub fn undo(&mut self) -> Result<bool, JsValue> {
        self.pad.undo().map_err(to_js)
    }

    pub fn redo(&mut self) -> Result<bool, JsValue> {
        self.pad.redo().map_err(to_js)
    }

    pub fn can_undo(&self) -> bool {
        self.pad.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.pad.can_redo()
    }

    /// Replace the canvas with the selected file's contents, as read by
    /// `FileReader.readAsArrayBuffer`.
    pub fn load_image(&mut self, buffer: &js_sys::ArrayBuffer) -> Result<(), JsValue> {
        let bytes = js_sys::Uint8Array::new(buffer).to_vec();
        self.dispatch(InputEvent::ImageFileSelected { bytes })
    }

    /// Encode the canvas as `png`, `jpeg` or `svg`.
    pub fn export(&self, format: &str) -> Result<Vec<u8>, JsValue> {
        let format: ExportFormat = format.parse().map_err(|e: String| JsValue::from_str(&e))?;
        Ok(self.pad.export(format).map_err(to_js)?.bytes)
    }

    /// Handle a key press. Returns true if it matched a shortcut.
    ///
    /// Export shortcuts only report the match; the page triggers the
    /// download through [`WebSketchpad::export`].
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool) -> Result<bool, JsValue> {
        let Some(action) = ShortcutRegistry::resolve(key, ctrl, shift) else {
            return Ok(false);
        };
        if !matches!(action, ShortcutAction::Export(_)) {
            self.pad.apply_shortcut(action).map_err(to_js)?;
        }
        Ok(true)
    }

    /// Straight-alpha RGBA8 pixels, row-major.
    pub fn pixels(&self) -> Result<Vec<u8>, JsValue> {
        self.pad.rgba_pixels().map_err(to_js)
    }

    /// Copy the raster onto a 2D canvas context.
    pub fn blit(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        let pixels = self.pixels()?;
        let data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&pixels),
            self.width(),
            self.height(),
        )?;
        ctx.put_image_data(&data, 0.0, 0.0)
    }
}

impl WebSketchpad {
    fn dispatch(&mut self, event: InputEvent) -> Result<(), JsValue> {
        self.pad.handle(event).map(|_| ()).map_err(to_js)
    }
}
