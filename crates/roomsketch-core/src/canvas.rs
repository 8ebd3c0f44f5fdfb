//! Runtime canvas state: document, camera, tools, and redraw tracking.

use crate::camera::Camera;
use crate::document::SketchDocument;
use crate::grid::{SNAP_STEP, snap_point};
use crate::input::{MouseButton, PointerEvent};
use crate::tools::{Interaction, ToolController, ToolKind};
use kurbo::{Point, Size};

/// Hit-test tolerance in screen pixels; divided by the zoom before use so
/// picking feels the same at every zoom level.
const HIT_TOLERANCE_PX: f64 = 4.0;

/// Complete interactive state of one sketch surface.
///
/// Every mutation raises a dirty flag; the paint loop consumes it through
/// [`SketchCanvas::take_redraw`] so unchanged frames skip rasterization.
#[derive(Debug, Clone)]
pub struct SketchCanvas {
    pub document: SketchDocument,
    pub camera: Camera,
    pub tools: ToolController,
    viewport_size: Size,
    needs_redraw: bool,
}

impl Default for SketchCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchCanvas {
    pub fn new() -> Self {
        Self {
            document: SketchDocument::new(),
            camera: Camera::new(),
            tools: ToolController::new(),
            viewport_size: Size::new(800.0, 600.0),
            needs_redraw: true,
        }
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        if size != self.viewport_size {
            self.viewport_size = size;
            self.mark_dirty();
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Returns whether a repaint is due and clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
        self.mark_dirty();
    }

    /// Dispatches a unified pointer event to the individual handlers.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position, button } => self.pointer_up(position, button),
            PointerEvent::Scroll { position, delta } => self.wheel(position, delta.y),
        }
    }

    pub fn pointer_down(&mut self, screen: Point, button: MouseButton) {
        if button == MouseButton::Middle {
            if self.tools.interaction() == Interaction::Idle {
                self.tools.begin_pan(screen);
            }
            return;
        }
        if button != MouseButton::Left {
            return;
        }
        // A left press cannot interrupt a pan or an active draw.
        if self.tools.interaction() != Interaction::Idle {
            return;
        }

        let world = self.camera.screen_to_world(screen);
        if !self.tools.current_tool.creates_shapes() {
            let tolerance = HIT_TOLERANCE_PX / self.camera.zoom;
            let hit = self
                .document
                .shapes_at_point(world, tolerance)
                .into_iter()
                .next();
            self.document.set_selected(hit);
            self.mark_dirty();
            return;
        }

        let snapped = snap_point(world, SNAP_STEP);
        if let Some(shape) = self.tools.current_tool.create_shape(snapped) {
            let id = self.document.add_shape(shape);
            self.document.set_selected(Some(id));
            self.tools.begin_drawing(id);
            self.mark_dirty();
        }
    }

    pub fn pointer_move(&mut self, screen: Point) {
        match self.tools.interaction() {
            Interaction::Idle => {}
            Interaction::Panning { last } => {
                self.camera.pan(screen - last);
                self.tools.update_pan(screen);
                self.mark_dirty();
            }
            Interaction::Drawing { shape } => {
                let world = self.camera.screen_to_world(screen);
                let tool = self.tools.current_tool;
                self.document.update_shape(shape, |s| tool.apply_drag(s, world));
                self.mark_dirty();
            }
        }
    }

    /// Ends the gesture the released button started: middle-up ends a pan,
    /// left-up ends a draw. The active tool stays selected so consecutive
    /// shapes can be drawn without re-picking it.
    pub fn pointer_up(&mut self, _screen: Point, button: MouseButton) {
        let ended = match self.tools.interaction() {
            Interaction::Idle => false,
            Interaction::Panning { .. } => button == MouseButton::Middle,
            Interaction::Drawing { .. } => button == MouseButton::Left,
        };
        if ended {
            self.tools.finish();
            self.mark_dirty();
        }
    }

    pub fn wheel(&mut self, screen: Point, delta_y: f64) {
        self.camera.zoom_wheel(screen, delta_y);
        self.mark_dirty();
    }

    /// Removes every shape and cancels any gesture in progress.
    pub fn clear(&mut self) {
        self.document.clear();
        self.tools.finish();
        self.mark_dirty();
    }

    /// Deletes the selected shape, if any.
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.document.selected() {
            self.document.remove_shape(id);
            self.mark_dirty();
        }
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
        self.mark_dirty();
    }
}
