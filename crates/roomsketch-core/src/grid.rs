//! Grid enumeration and snap quantization.
//!
//! The visual grid and the snap step are deliberately different sizes: the
//! grid is a coarse visual aid while snapping quantizes pointer input to a
//! finer step, so shapes can sit between grid lines but never off-step.

use crate::camera::Camera;
use kurbo::{Point, Size};

/// Spacing of grid lines, in world units.
pub const GRID_SIZE: f64 = 20.0;

/// Quantization step applied to pointer-derived coordinates, in world units.
pub const SNAP_STEP: f64 = 5.0;

/// Extra grid steps enumerated past each viewport edge so lines never pop in
/// at the border while panning.
const PAD_STEPS: i64 = 2;

/// Snaps a scalar to the nearest multiple of `step` (half away from zero).
pub fn snap_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

/// Snaps both coordinates of a point to the nearest multiple of `step`.
pub fn snap_point(point: Point, step: f64) -> Point {
    Point::new(snap_to_step(point.x, step), snap_to_step(point.y, step))
}

/// Grid lines covering the visible viewport, as world coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// X coordinates of vertical lines.
    pub verticals: Vec<f64>,
    /// Y coordinates of horizontal lines.
    pub horizontals: Vec<f64>,
}

/// Enumerates the grid lines visible through `camera` on a viewport of the
/// given size, padded by [`PAD_STEPS`] grid steps on every side.
///
/// Lines are generated from integer grid indices rather than by accumulating
/// floats, so deep zoom levels stay drift-free.
pub fn visible_grid_lines(camera: &Camera, viewport: Size) -> GridLines {
    let top_left = camera.screen_to_world(Point::ZERO);
    let bottom_right = camera.screen_to_world(Point::new(viewport.width, viewport.height));
    let pad = PAD_STEPS as f64 * GRID_SIZE;

    let verticals = grid_indices(top_left.x - pad, bottom_right.x + pad)
        .map(|i| i as f64 * GRID_SIZE)
        .collect();
    let horizontals = grid_indices(top_left.y - pad, bottom_right.y + pad)
        .map(|i| i as f64 * GRID_SIZE)
        .collect();

    GridLines {
        verticals,
        horizontals,
    }
}

fn grid_indices(min: f64, max: f64) -> std::ops::RangeInclusive<i64> {
    let first = (min / GRID_SIZE).floor() as i64;
    let last = (max / GRID_SIZE).ceil() as i64;
    first..=last
}

/// Which ruler strip a set of ticks belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulerAxis {
    Horizontal,
    Vertical,
}

/// One ruler tick: its screen position along the strip and the world
/// coordinate it labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulerTick {
    pub screen: f64,
    pub value: f64,
}

/// Derives ruler ticks for one axis, one tick per visible grid line.
/// `extent` is the viewport width (horizontal axis) or height (vertical).
pub fn ruler_ticks(camera: &Camera, extent: f64, axis: RulerAxis) -> Vec<RulerTick> {
    let offset = match axis {
        RulerAxis::Horizontal => camera.offset.x,
        RulerAxis::Vertical => camera.offset.y,
    };
    let step_px = GRID_SIZE * camera.zoom;
    let first = ((-offset) / step_px).floor() as i64 - PAD_STEPS;
    let last = ((extent - offset) / step_px).ceil() as i64 + PAD_STEPS;

    (first..=last)
        .map(|i| RulerTick {
            screen: i as f64 * step_px + offset,
            value: i as f64 * GRID_SIZE,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    #[test]
    fn snap_rounds_to_nearest_multiple() {
        assert_eq!(snap_to_step(37.2, 5.0), 35.0);
        assert_eq!(snap_to_step(43.0, 5.0), 45.0);
        assert_eq!(snap_to_step(87.0, 5.0), 85.0);
        assert_eq!(snap_to_step(-12.6, 5.0), -15.0);
        assert_eq!(snap_to_step(0.0, 5.0), 0.0);
    }

    #[test]
    fn snap_rounds_half_away_from_zero() {
        assert_eq!(snap_to_step(2.5, 5.0), 5.0);
        assert_eq!(snap_to_step(-2.5, 5.0), -5.0);
    }

    #[test]
    fn snap_is_idempotent() {
        for v in [-137.9, -2.4, 0.1, 12.5, 9999.3] {
            let once = snap_to_step(v, SNAP_STEP);
            assert_eq!(snap_to_step(once, SNAP_STEP), once);
        }
    }

    #[test]
    fn snap_point_snaps_both_axes() {
        let p = snap_point(Point::new(37.2, 43.0), SNAP_STEP);
        assert_eq!(p, Point::new(35.0, 45.0));
    }

    #[test]
    fn grid_lines_cover_viewport_with_padding() {
        let camera = Camera::new();
        let lines = visible_grid_lines(&camera, Size::new(200.0, 100.0));

        let first_x = *lines.verticals.first().unwrap();
        let last_x = *lines.verticals.last().unwrap();
        assert!(first_x <= -2.0 * GRID_SIZE);
        assert!(last_x >= 200.0 + 2.0 * GRID_SIZE);

        // Every line is an exact multiple of the grid size.
        for x in &lines.verticals {
            assert_eq!(x % GRID_SIZE, 0.0);
        }
        for y in &lines.horizontals {
            assert_eq!(y % GRID_SIZE, 0.0);
        }
    }

    #[test]
    fn grid_lines_follow_the_camera() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(-1000.0, 0.0));
        let lines = visible_grid_lines(&camera, Size::new(200.0, 100.0));

        // Screen x=0 is world x=1000 after the pan.
        assert!(lines.verticals.contains(&1000.0));
        assert!(!lines.verticals.contains(&0.0));
    }

    #[test]
    fn ruler_ticks_label_world_coordinates() {
        let camera = Camera::new();
        let ticks = ruler_ticks(&camera, 100.0, RulerAxis::Horizontal);

        let origin = ticks
            .iter()
            .find(|t| t.value == 0.0)
            .expect("origin tick visible");
        assert_eq!(origin.screen, 0.0);

        for pair in ticks.windows(2) {
            assert_eq!(pair[1].value - pair[0].value, GRID_SIZE);
        }
    }

    #[test]
    fn ruler_ticks_scale_with_zoom() {
        let mut camera = Camera::new();
        camera.zoom = 2.0;
        let ticks = ruler_ticks(&camera, 100.0, RulerAxis::Vertical);
        let pair = &ticks[..2];
        // Grid spacing doubles on screen, labels stay in world units.
        assert_eq!(pair[1].screen - pair[0].screen, GRID_SIZE * 2.0);
        assert_eq!(pair[1].value - pair[0].value, GRID_SIZE);
    }
}
