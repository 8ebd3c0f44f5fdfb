//! Image decode capability: returned design images arrive as raw bytes and
//! only their decoded pixel dimensions matter to the canvas layer.

use crate::renderer::{RenderError, RenderResult};

/// Decodes an image buffer (PNG or JPEG) and reports its pixel dimensions.
pub fn decoded_dimensions(bytes: &[u8]) -> RenderResult<(u32, u32)> {
    let img = image::load_from_memory(bytes).map_err(|e| RenderError::Decode(e.to_string()))?;
    Ok((img.width(), img.height()))
}
