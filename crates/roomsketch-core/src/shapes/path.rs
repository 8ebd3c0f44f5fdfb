//! Polyline shape backing both the line and pencil tools.

use super::{ShapeId, ShapeStyle, ShapeTrait, point_to_polyline_dist};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An open polyline. The line tool keeps exactly two points and moves the
/// second; the pencil tool appends points as the pointer moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    pub id: ShapeId,
    pub points: Vec<Point>,
    pub style: ShapeStyle,
}

impl PathShape {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style: ShapeStyle::default(),
        }
    }

    /// A degenerate two-point segment, both ends at `start`.
    pub fn segment(start: Point) -> Self {
        Self::new(vec![start, start])
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Moves the final point, growing a single-point path to two points.
    pub fn set_endpoint(&mut self, point: Point) {
        if self.points.len() >= 2 {
            if let Some(last) = self.points.last_mut() {
                *last = point;
            }
        } else {
            self.points.push(point);
        }
    }
}

impl ShapeTrait for PathShape {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let mut iter = self.points.iter();
        let Some(first) = iter.next() else {
            return Rect::ZERO;
        };
        let mut rect = Rect::from_points(*first, *first);
        for p in iter {
            rect = rect.union_pt(*p);
        }
        rect
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_polyline_dist(point, &self.points) <= tolerance + self.style.stroke_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for p in iter {
                path.line_to(*p);
            }
        }
        path
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

    #[test]
    fn set_endpoint_moves_only_the_last_point() {
        let mut line = PathShape::segment(Point::new(10.0, 10.0));
        line.set_endpoint(Point::new(50.0, 10.0));
        line.set_endpoint(Point::new(50.0, 30.0));
        assert_eq!(
            line.points,
            vec![Point::new(10.0, 10.0), Point::new(50.0, 30.0)]
        );
    }

    #[test]
    fn set_endpoint_grows_a_single_point_path() {
        let mut path = PathShape::new(vec![Point::ZERO]);
        path.set_endpoint(Point::new(5.0, 5.0));
        assert_eq!(path.points.len(), 2);
    }

    #[test]
    fn hit_test_uses_stroke_width() {
        let mut line = PathShape::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        line.style.stroke_width = 4.0;
        assert!(line.hit_test(Point::new(50.0, 3.0), 1.0));
        assert!(!line.hit_test(Point::new(50.0, 10.0), 1.0));
    }

    #[test]
    fn bounds_cover_all_points() {
        let path = PathShape::new(vec![
            Point::new(5.0, 5.0),
            Point::new(-10.0, 2.0),
            Point::new(3.0, 40.0),
        ]);
        assert_eq!(path.bounds(), Rect::new(-10.0, 2.0, 5.0, 40.0));
    }
}
