//! PNG export of the sketch surface for the submit pipeline.

use crate::raster::RasterRenderer;
use crate::renderer::{RenderContext, RenderError, RenderResult};
use roomsketch_core::SketchCanvas;

/// Export density: two device pixels per logical pixel, so the uploaded
/// control image keeps fine lines crisp after downstream processing.
pub const EXPORT_PIXEL_RATIO: f64 = 2.0;

/// Rasterizes the sketch to in-memory PNG bytes. Rulers are screen
/// furniture, not sketch content, so they are left out of the export.
pub fn export_png(canvas: &SketchCanvas) -> RenderResult<Vec<u8>> {
    let ctx = RenderContext::new(canvas)
        .with_pixel_ratio(EXPORT_PIXEL_RATIO)
        .with_rulers(false);
    let pixmap = RasterRenderer::new().render(&ctx)?;
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decoded_dimensions;
    use kurbo::{Point, Size};
    use roomsketch_core::{MouseButton, ToolKind};

    #[test]
    fn export_decodes_at_double_density() {
        let mut canvas = SketchCanvas::new();
        canvas.set_viewport_size(Size::new(320.0, 240.0));
        canvas.set_tool(ToolKind::Circle);
        canvas.pointer_down(Point::new(160.0, 120.0), MouseButton::Left);
        canvas.pointer_move(Point::new(200.0, 120.0));
        canvas.pointer_up(Point::new(200.0, 120.0), MouseButton::Left);

        let bytes = export_png(&canvas).unwrap();
        let (w, h) = decoded_dimensions(&bytes).unwrap();
        assert_eq!((w, h), (640, 480));
    }

    #[test]
    fn export_of_empty_sketch_still_succeeds() {
        let mut canvas = SketchCanvas::new();
        canvas.set_viewport_size(Size::new(100.0, 100.0));
        let bytes = export_png(&canvas).unwrap();
        assert!(!bytes.is_empty());
    }
}
