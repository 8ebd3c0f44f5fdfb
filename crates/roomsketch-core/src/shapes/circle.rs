//! Circle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub id: ShapeId,
    pub center: Point,
    pub radius: f64,
    pub style: ShapeStyle,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            style: ShapeStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dist = (point - self.center).hypot();
        if self.style.fill_color.is_some() {
            dist <= self.radius + tolerance
        } else {
            (dist - self.radius).abs() <= tolerance + self.style.stroke_width / 2.0
        }
    }

    fn to_path(&self) -> BezPath {
        KurboCircle::new(self.center, self.radius).to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::SerializableColor;

    #[test]
    fn filled_circle_hit_includes_interior() {
        let mut circle = Circle::new(Point::new(100.0, 100.0), 30.0);
        circle.style.fill_color = Some(SerializableColor::rgba(16, 185, 129, 26));
        assert!(circle.hit_test(Point::new(100.0, 100.0), 0.0));
        assert!(circle.hit_test(Point::new(129.0, 100.0), 0.0));
        assert!(!circle.hit_test(Point::new(140.0, 100.0), 2.0));
    }

    #[test]
    fn outline_circle_hit_is_a_ring() {
        let circle = Circle::new(Point::new(0.0, 0.0), 50.0);
        assert!(circle.hit_test(Point::new(50.0, 0.0), 2.0));
        assert!(!circle.hit_test(Point::new(0.0, 0.0), 2.0));
    }

    #[test]
    fn bounds_span_the_diameter() {
        let circle = Circle::new(Point::new(10.0, 20.0), 5.0);
        assert_eq!(circle.bounds(), Rect::new(5.0, 15.0, 15.0, 25.0));
    }
}
