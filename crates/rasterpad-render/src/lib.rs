//! Rasterpad Render Library
//!
//! CPU rasterization of overlays onto the canvas surface, plus the codecs
//! used to export the canvas and import images into it.

mod export;
mod import;
mod renderer;
mod surface;

pub use export::{
    ExportError, ExportOptions, encode, encode_jpeg, encode_png, encode_svg, straight_rgba,
};
pub use import::{ImportError, decode_for_canvas};
pub use renderer::{RenderResult, RendererError, draw_overlay, render, to_skia_path};
pub use surface::RasterSurface;
