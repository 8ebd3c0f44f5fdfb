//! The sketch document: authoritative store for all drawn shapes.

use crate::shapes::{Shape, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owns every shape on the canvas plus the current selection.
///
/// Z-order equals insertion order: shapes added later draw on top. The
/// selection is cleared whenever the selected shape is removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SketchDocument {
    shapes: HashMap<ShapeId, Shape>,
    z_order: Vec<ShapeId>,
    selected: Option<ShapeId>,
}

impl SketchDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shape on top of the stack and returns its id.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.insert(id, shape);
        self.z_order.push(id);
        id
    }

    /// Removes a shape. Clears the selection if it pointed at the shape.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.shapes.remove(&id)?;
        self.z_order.retain(|&z| z != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(removed)
    }

    /// Removes every shape and clears the selection.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
        self.selected = None;
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Applies `f` to the shape with the given id. A missing id is a silent
    /// no-op: stale ids arise from pointer-event ordering during fast
    /// drawing and must not disturb other shapes.
    pub fn update_shape(&mut self, id: ShapeId, f: impl FnOnce(&mut Shape)) -> bool {
        match self.shapes.get_mut(&id) {
            Some(shape) => {
                f(shape);
                true
            }
            None => {
                log::debug!("update for unknown shape {id}, ignoring");
                false
            }
        }
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn set_selected(&mut self, id: Option<ShapeId>) {
        self.selected = id;
    }

    /// Shapes in z-order, bottom first.
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Ids of shapes hit at `point`, front-to-back.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|id| self.shapes.get(id))
            .filter(|shape| shape.hit_test(point, tolerance))
            .map(|shape| shape.id())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
