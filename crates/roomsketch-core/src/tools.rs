//! Tool system: interprets pointer gestures per the active tool.

use crate::grid::{SNAP_STEP, snap_point, snap_to_step};
use crate::shapes::{
    Circle, PathShape, Rectangle, SerializableColor, Shape, ShapeId, ShapeStyle, TextLabel,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available drawing and manipulation tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Select,
    Rect,
    Circle,
    Line,
    Pencil,
    Text,
}

impl ToolKind {
    /// Whether a pointer-down with this tool starts a new shape.
    pub fn creates_shapes(self) -> bool {
        !matches!(self, ToolKind::Select)
    }

    /// The style a shape created by this tool gets. One fixed palette per
    /// tool; styles are not edited after creation.
    pub fn creation_style(self) -> ShapeStyle {
        match self {
            ToolKind::Select => ShapeStyle::default(),
            ToolKind::Rect => ShapeStyle {
                stroke_color: SerializableColor::rgb(99, 102, 241),
                stroke_width: 2.0,
                fill_color: Some(SerializableColor::rgba(99, 102, 241, 26)),
            },
            ToolKind::Circle => ShapeStyle {
                stroke_color: SerializableColor::rgb(16, 185, 129),
                stroke_width: 2.0,
                fill_color: Some(SerializableColor::rgba(16, 185, 129, 26)),
            },
            ToolKind::Line => ShapeStyle {
                stroke_color: SerializableColor::rgb(245, 158, 11),
                stroke_width: 3.0,
                fill_color: None,
            },
            ToolKind::Pencil => ShapeStyle {
                stroke_color: SerializableColor::rgb(255, 255, 255),
                stroke_width: 2.0,
                fill_color: None,
            },
            // Light gray rather than the usual dark label color, so text
            // stays legible on the near-black canvas.
            ToolKind::Text => ShapeStyle {
                stroke_color: SerializableColor::rgb(229, 231, 235),
                stroke_width: 1.0,
                fill_color: None,
            },
        }
    }

    /// Creates this tool's shape at an already-snapped world point.
    pub fn create_shape(self, snapped: Point) -> Option<Shape> {
        match self {
            ToolKind::Select => None,
            ToolKind::Rect => Some(Shape::Rectangle(
                Rectangle::new(snapped, 0.0, 0.0).with_style(self.creation_style()),
            )),
            ToolKind::Circle => Some(Shape::Circle(
                Circle::new(snapped, 1.0).with_style(self.creation_style()),
            )),
            ToolKind::Line => Some(Shape::Path(
                PathShape::segment(snapped).with_style(self.creation_style()),
            )),
            ToolKind::Pencil => Some(Shape::Path(
                PathShape::new(vec![snapped]).with_style(self.creation_style()),
            )),
            ToolKind::Text => {
                let mut label = TextLabel::new(snapped, crate::shapes::DEFAULT_TEXT);
                label.style = self.creation_style();
                Some(Shape::Text(label))
            }
        }
    }

    /// Mutates the in-progress shape as the pointer moves to `world`.
    /// Everything written into the shape passes through the snap step.
    pub fn apply_drag(self, shape: &mut Shape, world: Point) {
        match (self, shape) {
            (ToolKind::Rect, Shape::Rectangle(rect)) => {
                rect.width = snap_to_step(world.x - rect.position.x, SNAP_STEP);
                rect.height = snap_to_step(world.y - rect.position.y, SNAP_STEP);
            }
            (ToolKind::Circle, Shape::Circle(circle)) => {
                let dist = (world - circle.center).hypot();
                circle.radius = snap_to_step(dist, SNAP_STEP).max(0.0);
            }
            (ToolKind::Line, Shape::Path(path)) => {
                path.set_endpoint(snap_point(world, SNAP_STEP));
            }
            (ToolKind::Pencil, Shape::Path(path)) => {
                path.add_point(snap_point(world, SNAP_STEP));
            }
            _ => {}
        }
    }
}

/// Interaction state of the pointer with respect to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// Middle-button pan; `last` is the previous screen-space sample.
    Panning { last: Point },
    /// A shape is being drawn; all mutations target this shape only.
    Drawing { shape: ShapeId },
}

/// Tracks the active tool and the current pointer interaction.
#[derive(Debug, Clone, Default)]
pub struct ToolController {
    pub current_tool: ToolKind,
    interaction: Interaction,
}

impl ToolController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Id of the shape being drawn, if any.
    pub fn active_shape(&self) -> Option<ShapeId> {
        match self.interaction {
            Interaction::Drawing { shape } => Some(shape),
            _ => None,
        }
    }

    /// Switches tools. Always drops back to Idle; never alters shapes that
    /// already exist.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.interaction = Interaction::Idle;
    }

    pub(crate) fn begin_pan(&mut self, screen: Point) {
        self.interaction = Interaction::Panning { last: screen };
    }

    pub(crate) fn update_pan(&mut self, screen: Point) {
        self.interaction = Interaction::Panning { last: screen };
    }

    pub(crate) fn begin_drawing(&mut self, shape: ShapeId) {
        self.interaction = Interaction::Drawing { shape };
    }

    pub(crate) fn finish(&mut self) {
        self.interaction = Interaction::Idle;
    }
}
