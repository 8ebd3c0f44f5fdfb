//! RoomSketch core library.
//!
//! Platform-agnostic state and geometry for the room layout canvas: the
//! pan/zoom camera, the snapping grid, the shape document, and the tool
//! state machine that turns pointer events into document mutations.
//! No I/O happens here; rendering and networking live in sibling crates.

pub mod camera;
pub mod canvas;
pub mod document;
pub mod grid;
pub mod input;
pub mod shapes;
pub mod tools;

pub use camera::Camera;
pub use canvas::SketchCanvas;
pub use document::SketchDocument;
pub use grid::{GRID_SIZE, SNAP_STEP, snap_point, snap_to_step};
pub use input::{MouseButton, PointerEvent};
pub use shapes::{Shape, ShapeId, ShapeStyle};
pub use tools::{Interaction, ToolController, ToolKind};
