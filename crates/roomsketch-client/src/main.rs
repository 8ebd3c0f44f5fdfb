//! RoomSketch CLI
//!
//! Renders a sketch to a PNG and optionally submits it for AI design
//! generation.
//!
//! ```text
//! roomsketch [sketch.json]
//! ```
//!
//! With a path argument the sketch document is loaded from JSON; without
//! one a small demo layout is drawn through the tool state machine.
//!
//! Environment:
//! - `ROOMSKETCH_API`    backend base URL; when unset the sketch is only exported
//! - `ROOMSKETCH_OUT`    output PNG path (default `sketch.png`)
//! - `ROOMSKETCH_PROMPT` design prompt
//! - `ROOMSKETCH_ROOM`   room type: living_room | bedroom | kitchen | office
//! - `ROOMSKETCH_SIZE`   room size: small | medium | large
//! - `ROOMSKETCH_BUDGET` maximum budget

use kurbo::{Point, Size};
use roomsketch_client::{DesignParams, HttpBackend, RoomSize, RoomType, SubmitPipeline};
use roomsketch_core::{MouseButton, SketchCanvas, SketchDocument, ToolKind};
use roomsketch_render::export_png;
use std::env;
use std::error::Error;
use tracing::{info, warn};
use url::Url;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomsketch=info,roomsketch_client=info".into()),
        )
        .init();

    let mut canvas = SketchCanvas::new();
    canvas.set_viewport_size(Size::new(800.0, 600.0));

    match env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            canvas.document = SketchDocument::from_json(&json)?;
            info!(%path, shapes = canvas.document.len(), "sketch loaded");
        }
        None => {
            draw_demo_room(&mut canvas);
            info!(shapes = canvas.document.len(), "demo sketch drawn");
        }
    }

    let png = export_png(&canvas)?;
    let out = env::var("ROOMSKETCH_OUT").unwrap_or_else(|_| "sketch.png".to_string());
    std::fs::write(&out, &png)?;
    info!(path = %out, bytes = png.len(), "sketch exported");

    let Ok(base) = env::var("ROOMSKETCH_API") else {
        info!("ROOMSKETCH_API not set, skipping submission");
        return Ok(());
    };
    let base = Url::parse(&base)?;
    let backend = HttpBackend::new(base)?;
    let pipeline = SubmitPipeline::new(backend.clone(), backend);

    let result = pipeline.submit(&canvas, params_from_env()).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn params_from_env() -> DesignParams {
    let room_type = env::var("ROOMSKETCH_ROOM")
        .ok()
        .and_then(|s| {
            let parsed = RoomType::from_arg(&s);
            if parsed.is_none() {
                warn!(value = %s, "unknown room type, using default");
            }
            parsed
        })
        .unwrap_or_default();
    let room_size = env::var("ROOMSKETCH_SIZE")
        .ok()
        .and_then(|s| {
            let parsed = RoomSize::from_arg(&s);
            if parsed.is_none() {
                warn!(value = %s, "unknown room size, using default");
            }
            parsed
        })
        .unwrap_or_default();
    let budget_max = env::var("ROOMSKETCH_BUDGET")
        .ok()
        .and_then(|s| s.parse().ok());

    DesignParams {
        prompt: env::var("ROOMSKETCH_PROMPT")
            .unwrap_or_else(|_| "furnish this room layout".to_string()),
        room_type,
        room_size,
        style_preferences: Vec::new(),
        budget_max,
    }
}

/// Draws a small furnished-room layout through the same pointer path the
/// interactive surface uses.
fn draw_demo_room(canvas: &mut SketchCanvas) {
    let drag = |canvas: &mut SketchCanvas, tool, from: Point, to: Point| {
        canvas.set_tool(tool);
        canvas.pointer_down(from, MouseButton::Left);
        canvas.pointer_move(to);
        canvas.pointer_up(to, MouseButton::Left);
    };

    // Room outline, a sofa, a rug, one wall accent and a label.
    drag(
        canvas,
        ToolKind::Rect,
        Point::new(100.0, 100.0),
        Point::new(600.0, 450.0),
    );
    drag(
        canvas,
        ToolKind::Rect,
        Point::new(140.0, 140.0),
        Point::new(300.0, 220.0),
    );
    drag(
        canvas,
        ToolKind::Circle,
        Point::new(400.0, 320.0),
        Point::new(470.0, 320.0),
    );
    drag(
        canvas,
        ToolKind::Line,
        Point::new(100.0, 280.0),
        Point::new(250.0, 280.0),
    );

    canvas.set_tool(ToolKind::Text);
    canvas.pointer_down(Point::new(320.0, 120.0), MouseButton::Left);
    canvas.pointer_up(Point::new(320.0, 120.0), MouseButton::Left);

    canvas.set_tool(ToolKind::Select);
}
