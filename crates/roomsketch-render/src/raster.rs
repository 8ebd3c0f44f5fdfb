//! tiny-skia rasterizer for the sketch surface.
//!
//! Draw order per pass: background, grid, shapes in z-order, rulers,
//! dimension badge for a selected rectangle. Rulers live in screen space and
//! are drawn last so they always overlay the drawing.

use crate::renderer::{RenderContext, RenderError, RenderResult};
use crate::text;
use kurbo::{BezPath, PathEl, Point, Rect};
use roomsketch_core::grid::{self, RulerAxis};
use roomsketch_core::shapes::{SerializableColor, Shape};
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

const GRID_COLOR: SerializableColor = SerializableColor::rgb(34, 34, 34);
const RULER_BG: SerializableColor = SerializableColor::rgb(243, 244, 246);
const RULER_TICK: SerializableColor = SerializableColor::rgb(156, 163, 175);
const RULER_LABEL: SerializableColor = SerializableColor::rgb(75, 85, 99);
const BADGE_BG: SerializableColor = SerializableColor::rgba(0, 0, 0, 180);
const BADGE_TEXT: SerializableColor = SerializableColor::rgb(255, 255, 255);

/// Ruler strip thickness in logical pixels.
const RULER_THICKNESS: f64 = 24.0;
const RULER_FONT_SIZE: f64 = 10.0;
const BADGE_FONT_SIZE: f64 = 12.0;

fn to_skia_color(c: SerializableColor) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn solid_paint<'a>(c: SerializableColor) -> Paint<'a> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(c));
    paint.anti_alias = true;
    paint
}

/// Converts a kurbo path into a tiny-skia path. Returns `None` for empty or
/// degenerate geometry, which callers simply skip.
fn bez_to_skia(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// CPU renderer producing a pixmap from a render context.
#[derive(Debug, Default)]
pub struct RasterRenderer;

impl RasterRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Rasterizes one frame. The result is deterministic for a given
    /// context, apart from text when no system font is installed.
    pub fn render(&self, ctx: &RenderContext) -> RenderResult<Pixmap> {
        let width = (ctx.viewport_size.width * ctx.pixel_ratio).round() as u32;
        let height = (ctx.viewport_size.height * ctx.pixel_ratio).round() as u32;
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidSurface { width, height })?;
        pixmap.fill(to_skia_color(ctx.background));

        let camera = &ctx.canvas.camera;
        // World to device: zoom then pan, everything scaled by the pixel ratio.
        let world_ts = Transform::from_row(
            (camera.zoom * ctx.pixel_ratio) as f32,
            0.0,
            0.0,
            (camera.zoom * ctx.pixel_ratio) as f32,
            (camera.offset.x * ctx.pixel_ratio) as f32,
            (camera.offset.y * ctx.pixel_ratio) as f32,
        );

        if ctx.show_grid {
            self.draw_grid(&mut pixmap, ctx, world_ts);
        }
        for shape in ctx.canvas.document.shapes_ordered() {
            self.draw_shape(&mut pixmap, shape, world_ts);
        }
        if ctx.show_rulers {
            self.draw_rulers(&mut pixmap, ctx);
        }
        self.draw_dimension_badge(&mut pixmap, ctx);

        Ok(pixmap)
    }

    fn draw_grid(&self, pixmap: &mut Pixmap, ctx: &RenderContext, world_ts: Transform) {
        let camera = &ctx.canvas.camera;
        let lines = grid::visible_grid_lines(camera, ctx.viewport_size);
        if lines.verticals.is_empty() || lines.horizontals.is_empty() {
            return;
        }

        let y_min = *lines.horizontals.first().unwrap_or(&0.0) as f32;
        let y_max = *lines.horizontals.last().unwrap_or(&0.0) as f32;
        let x_min = *lines.verticals.first().unwrap_or(&0.0) as f32;
        let x_max = *lines.verticals.last().unwrap_or(&0.0) as f32;

        let mut pb = PathBuilder::new();
        for &x in &lines.verticals {
            pb.move_to(x as f32, y_min);
            pb.line_to(x as f32, y_max);
        }
        for &y in &lines.horizontals {
            pb.move_to(x_min, y as f32);
            pb.line_to(x_max, y as f32);
        }
        let Some(path) = pb.finish() else {
            return;
        };

        // One device pixel regardless of zoom.
        let stroke = Stroke {
            width: (1.0 / (camera.zoom * ctx.pixel_ratio)) as f32,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &solid_paint(GRID_COLOR), &stroke, world_ts, None);
    }

    fn draw_shape(&self, pixmap: &mut Pixmap, shape: &Shape, world_ts: Transform) {
        if let Shape::Text(label) = shape {
            self.draw_text_label(pixmap, label, world_ts);
            return;
        }

        let Some(path) = bez_to_skia(&shape.to_path()) else {
            return;
        };
        let style = shape.style();

        if let Some(fill) = style.fill_color {
            pixmap.fill_path(&path, &solid_paint(fill), FillRule::Winding, world_ts, None);
        }
        let stroke = Stroke {
            width: style.stroke_width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        pixmap.stroke_path(
            &path,
            &solid_paint(style.stroke_color),
            &stroke,
            world_ts,
            None,
        );
    }

    fn draw_text_label(
        &self,
        pixmap: &mut Pixmap,
        label: &roomsketch_core::shapes::TextLabel,
        world_ts: Transform,
    ) {
        // The world transform is a uniform scale plus translation.
        let x = label.position.x as f32 * world_ts.sx + world_ts.tx;
        let y = label.position.y as f32 * world_ts.sy + world_ts.ty;
        let size = label.font_size as f32 * world_ts.sx;
        text::draw_text(pixmap, &label.text, x, y, size, label.style.stroke_color);
    }

    fn draw_rulers(&self, pixmap: &mut Pixmap, ctx: &RenderContext) {
        let pr = ctx.pixel_ratio;
        let thickness = (RULER_THICKNESS * pr) as f32;
        let width = pixmap.width() as f32;
        let height = pixmap.height() as f32;
        let identity = Transform::identity();

        let top = match tiny_skia::Rect::from_xywh(0.0, 0.0, width, thickness) {
            Some(r) => r,
            None => return,
        };
        let left = match tiny_skia::Rect::from_xywh(0.0, 0.0, thickness, height) {
            Some(r) => r,
            None => return,
        };
        pixmap.fill_rect(top, &solid_paint(RULER_BG), identity, None);
        pixmap.fill_rect(left, &solid_paint(RULER_BG), identity, None);

        let camera = &ctx.canvas.camera;
        let tick_len = (6.0 * pr) as f32;
        let font_size = (RULER_FONT_SIZE * pr) as f32;
        let mut pb = PathBuilder::new();

        for tick in grid::ruler_ticks(camera, ctx.viewport_size.width, RulerAxis::Horizontal) {
            let x = (tick.screen * pr) as f32;
            if x < thickness || x > width {
                continue;
            }
            pb.move_to(x, thickness - tick_len);
            pb.line_to(x, thickness);
            text::draw_text(
                pixmap,
                &format!("{:.0}", tick.value),
                x + 2.0,
                2.0 * pr as f32,
                font_size,
                RULER_LABEL,
            );
        }
        for tick in grid::ruler_ticks(camera, ctx.viewport_size.height, RulerAxis::Vertical) {
            let y = (tick.screen * pr) as f32;
            if y < thickness || y > height {
                continue;
            }
            pb.move_to(thickness - tick_len, y);
            pb.line_to(thickness, y);
            text::draw_text(
                pixmap,
                &format!("{:.0}", tick.value),
                2.0 * pr as f32,
                y + 2.0,
                font_size,
                RULER_LABEL,
            );
        }

        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width: pr as f32,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &solid_paint(RULER_TICK), &stroke, identity, None);
        }
    }

    /// Draws a "W×H px" badge above the selected rectangle, in world units
    /// with absolute magnitudes.
    fn draw_dimension_badge(&self, pixmap: &mut Pixmap, ctx: &RenderContext) {
        let Some(id) = ctx.canvas.document.selected() else {
            return;
        };
        let Some(Shape::Rectangle(rect)) = ctx.canvas.document.get_shape(id) else {
            return;
        };

        let bounds: Rect = rect.normalized();
        let label = format!("{:.0}×{:.0} px", bounds.width(), bounds.height());

        let camera = &ctx.canvas.camera;
        let pr = ctx.pixel_ratio;
        let top_center = camera.world_to_screen(Point::new(bounds.center().x, bounds.y0));

        let font_size = (BADGE_FONT_SIZE * pr) as f32;
        let text_w = text::measure_text(&label, font_size);
        let pad = (4.0 * pr) as f32;
        let badge_w = text_w + pad * 2.0;
        let badge_h = font_size + pad * 2.0;
        let badge_x = (top_center.x * pr) as f32 - badge_w / 2.0;
        let badge_y = (top_center.y * pr) as f32 - badge_h - (6.0 * pr) as f32;

        if let Some(r) = tiny_skia::Rect::from_xywh(badge_x, badge_y, badge_w, badge_h) {
            pixmap.fill_rect(r, &solid_paint(BADGE_BG), Transform::identity(), None);
        }
        text::draw_text(
            pixmap,
            &label,
            badge_x + pad,
            badge_y + pad,
            font_size,
            BADGE_TEXT,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use roomsketch_core::{MouseButton, SketchCanvas, ToolKind};

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * pixmap.width() + x) * 4) as usize;
        let d = pixmap.data();
        [d[idx], d[idx + 1], d[idx + 2], d[idx + 3]]
    }

    fn sketch_with_rect() -> SketchCanvas {
        let mut canvas = SketchCanvas::new();
        canvas.set_viewport_size(Size::new(400.0, 300.0));
        canvas.set_tool(ToolKind::Rect);
        canvas.pointer_down(Point::new(100.0, 100.0), MouseButton::Left);
        canvas.pointer_move(Point::new(200.0, 180.0));
        canvas.pointer_up(Point::new(200.0, 180.0), MouseButton::Left);
        canvas
    }

    #[test]
    fn render_produces_viewport_sized_pixmap() {
        let canvas = sketch_with_rect();
        let ctx = RenderContext::new(&canvas);
        let pixmap = RasterRenderer::new().render(&ctx).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (400, 300));
    }

    #[test]
    fn pixel_ratio_scales_the_surface() {
        let canvas = sketch_with_rect();
        let ctx = RenderContext::new(&canvas).with_pixel_ratio(2.0);
        let pixmap = RasterRenderer::new().render(&ctx).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (800, 600));
    }

    #[test]
    fn zero_viewport_is_an_error() {
        let mut canvas = SketchCanvas::new();
        canvas.set_viewport_size(Size::new(0.0, 100.0));
        let ctx = RenderContext::new(&canvas);
        let err = RasterRenderer::new().render(&ctx).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSurface { .. }));
    }

    #[test]
    fn filled_shape_changes_pixels_over_background() {
        let canvas = sketch_with_rect();
        let ctx = RenderContext::new(&canvas).with_rulers(false).with_grid(false);
        let pixmap = RasterRenderer::new().render(&ctx).unwrap();

        let inside = pixel(&pixmap, 150, 140);
        let outside = pixel(&pixmap, 390, 290);
        assert_ne!(inside, outside);
        assert_eq!(outside, [18, 18, 18, 255]);
    }

    #[test]
    fn ruler_strips_are_light_over_the_dark_canvas() {
        let canvas = sketch_with_rect();
        let ctx = RenderContext::new(&canvas).with_grid(false);
        let pixmap = RasterRenderer::new().render(&ctx).unwrap();

        // y=15 sits below the tick labels and above the tick marks.
        let in_top_ruler = pixel(&pixmap, 200, 15);
        assert_eq!(
            in_top_ruler,
            [RULER_BG.r, RULER_BG.g, RULER_BG.b, RULER_BG.a]
        );
    }

    #[test]
    fn empty_bez_path_converts_to_none() {
        assert!(bez_to_skia(&BezPath::new()).is_none());
    }
}
