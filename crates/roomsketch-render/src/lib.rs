//! RoomSketch render library.
//!
//! CPU rasterization of the sketch surface (grid, shapes, rulers, dimension
//! annotation) via tiny-skia, glyph rendering via system fonts, and PNG
//! export for the submit pipeline.

pub mod decode;
pub mod export;
pub mod raster;
pub mod renderer;
mod text;

pub use decode::decoded_dimensions;
pub use export::{EXPORT_PIXEL_RATIO, export_png};
pub use raster::RasterRenderer;
pub use renderer::{RenderContext, RenderError, RenderResult, SurfaceSizeProvider};
