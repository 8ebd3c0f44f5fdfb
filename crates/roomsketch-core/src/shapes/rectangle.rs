//! Axis-aligned rectangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangle anchored at `position` with signed extents.
///
/// While being drawn the width and height follow the pointer and may be
/// negative; consumers normalize through [`Rectangle::normalized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: ShapeId,
    /// Drag origin, not necessarily the top-left corner.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub style: ShapeStyle,
}

impl Rectangle {
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style: ShapeStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Normalized world rect with non-negative extents.
    pub fn normalized(&self) -> Rect {
        let corner = self.position + Vec2::new(self.width, self.height);
        Rect::from_points(self.position, corner)
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.normalized()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rect = self.normalized();
        if self.style.fill_color.is_some() {
            rect.inflate(tolerance, tolerance).contains(point)
        } else {
            // Outline only: near any edge but not deep inside.
            let pad = tolerance + self.style.stroke_width / 2.0;
            let outer = rect.inflate(pad, pad);
            let inner = rect.inflate(-pad, -pad);
            outer.contains(point) && !(inner.width() > 0.0 && inner.contains(point))
        }
    }

    fn to_path(&self) -> BezPath {
        self.normalized().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
