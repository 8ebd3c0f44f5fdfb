//! Render context and error types.

use kurbo::Size;
use roomsketch_core::SketchCanvas;
use roomsketch_core::shapes::SerializableColor;
use thiserror::Error;

/// Errors that can occur during rasterization or export.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid surface size: {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("image decoding failed: {0}")]
    Decode(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Supplies the current drawing-surface pixel dimensions. Platform shells
/// implement this around their resize notifications so the renderer never
/// talks to the windowing layer directly.
pub trait SurfaceSizeProvider {
    fn surface_size(&self) -> Size;
}

/// Everything one render pass needs. A pass is a pure function of this
/// context; it never mutates the canvas.
pub struct RenderContext<'a> {
    pub canvas: &'a SketchCanvas,
    pub viewport_size: Size,
    /// Device pixels per logical pixel; 2.0 for export.
    pub pixel_ratio: f64,
    pub background: SerializableColor,
    pub show_grid: bool,
    pub show_rulers: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(canvas: &'a SketchCanvas) -> Self {
        Self {
            canvas,
            viewport_size: canvas.viewport_size(),
            pixel_ratio: 1.0,
            background: SerializableColor::rgb(18, 18, 18),
            show_grid: true,
            show_rulers: true,
        }
    }

    pub fn with_viewport_size(mut self, size: Size) -> Self {
        self.viewport_size = size;
        self
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    pub fn with_background(mut self, background: SerializableColor) -> Self {
        self.background = background;
        self
    }

    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    pub fn with_rulers(mut self, show_rulers: bool) -> Self {
        self.show_rulers = show_rulers;
        self
    }

    /// Sizes the pass from a live surface instead of the canvas snapshot.
    pub fn sized_by(self, provider: &dyn SurfaceSizeProvider) -> Self {
        self.with_viewport_size(provider.surface_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSurface(Size);

    impl SurfaceSizeProvider for FixedSurface {
        fn surface_size(&self) -> Size {
            self.0
        }
    }

    #[test]
    fn context_takes_its_size_from_a_provider() {
        let canvas = SketchCanvas::new();
        let surface = FixedSurface(Size::new(1024.0, 768.0));
        let ctx = RenderContext::new(&canvas).sized_by(&surface);
        assert_eq!(ctx.viewport_size, Size::new(1024.0, 768.0));
    }

    #[test]
    fn builders_override_defaults() {
        let canvas = SketchCanvas::new();
        let ctx = RenderContext::new(&canvas)
            .with_pixel_ratio(2.0)
            .with_grid(false)
            .with_rulers(false)
            .with_background(SerializableColor::rgb(0, 0, 0));
        assert_eq!(ctx.pixel_ratio, 2.0);
        assert!(!ctx.show_grid);
        assert!(!ctx.show_rulers);
        assert_eq!(ctx.background, SerializableColor::rgb(0, 0, 0));
    }
}
