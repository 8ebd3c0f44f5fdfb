//! Text label shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_TEXT: &str = "Label";
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// A text label anchored at its top-left corner. The style's stroke color is
/// the text color; glyph rasterization happens in the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub id: ShapeId,
    pub position: Point,
    pub text: String,
    pub font_size: f64,
    pub style: ShapeStyle,
}

impl TextLabel {
    pub fn new(position: Point, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            text: text.into(),
            font_size: DEFAULT_FONT_SIZE,
            style: ShapeStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Approximate extent without font metrics: 0.6 em average advance,
    /// 1.2 em line height. Good enough for hit testing.
    pub fn approx_size(&self) -> Size {
        Size::new(
            self.text.chars().count() as f64 * self.font_size * 0.6,
            self.font_size * 1.2,
        )
    }
}

impl ShapeTrait for TextLabel {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let size = self.approx_size();
        Rect::from_origin_size(self.position, size)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        BezPath::new()
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
