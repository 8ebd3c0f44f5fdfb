//! Camera module for pan/zoom navigation of the sketch surface.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom factor applied per wheel tick. Scrolling up multiplies the zoom by
/// this factor, scrolling down divides by it.
pub const ZOOM_STEP: f64 = 1.06;

/// Camera manages the view transform between world space (where shapes live)
/// and screen space (surface pixels).
///
/// The mapping is `screen = world * zoom + offset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current pan offset in screen pixels.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a point from world coordinates to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.zoom + self.offset.x,
            world.y * self.zoom + self.offset.y,
        )
    }

    /// Converts a point from screen coordinates to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.zoom,
            (screen.y - self.offset.y) / self.zoom,
        )
    }

    /// Pans the camera by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zooms by `factor` while keeping the world point under `screen_point`
    /// stationary on screen.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if new_zoom == self.zoom {
            return;
        }

        // Anchor the world point under the cursor.
        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;
        let new_screen = self.world_to_screen(world_point);
        self.offset += screen_point - new_screen;
    }

    /// Applies one wheel tick at `screen_point`. A positive `delta_y`
    /// (scrolling down) zooms out, a negative one zooms in.
    pub fn zoom_wheel(&mut self, screen_point: Point, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            1.0 / ZOOM_STEP
        } else {
            ZOOM_STEP
        };
        self.zoom_at(screen_point, factor);
    }

    /// Restores the identity view: zoom 1.0, no pan.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }
}
