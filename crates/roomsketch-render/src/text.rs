//! System-font lookup and glyph rasterization.
//!
//! tiny-skia draws geometry only, so glyphs are rasterized with rusttype
//! and blitted into the pixmap. When no system font can be found the
//! surface still renders all geometry; labels are skipped with a warning.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use roomsketch_core::shapes::SerializableColor;
use rusttype::{Font, Scale, point};
use std::sync::OnceLock;
use tiny_skia::Pixmap;

fn system_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(load_system_font).as_ref()
}

fn load_system_font() -> Option<Font<'static>> {
    let mut db = Database::new();
    db.load_system_fonts();

    let query = Query {
        families: &[Family::SansSerif, Family::Serif, Family::Monospace],
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let Some(id) = db.query(&query) else {
        log::warn!("no usable system font; text labels will not be rendered");
        return None;
    };

    db.with_face_data(id, |data, index| {
        Font::try_from_vec_and_index(data.to_vec(), index)
    })?
}

/// Approximate advance width of `text` at `size` pixels. Falls back to a
/// 0.6 em heuristic when no font is available.
pub(crate) fn measure_text(text: &str, size: f32) -> f32 {
    let Some(font) = system_font() else {
        return text.chars().count() as f32 * size * 0.6;
    };
    let scale = Scale::uniform(size);
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Blits `text` into the pixmap with its top-left corner at `(x, y)`.
/// Coordinates are device pixels.
pub(crate) fn draw_text(
    pixmap: &mut Pixmap,
    text: &str,
    x: f32,
    y: f32,
    size: f32,
    color: SerializableColor,
) {
    let Some(font) = system_font() else {
        return;
    };
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let start = point(x, y + v_metrics.ascent);

    let width = pixmap.width();
    let height = pixmap.height();

    for glyph in font.layout(text, scale, start) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                return;
            }
            let alpha = (coverage * color.a as f32) as u16;
            if alpha == 0 {
                return;
            }

            // Source-over blend in premultiplied-alpha space.
            let src_r = (color.r as u16 * alpha / 255) as u8;
            let src_g = (color.g as u16 * alpha / 255) as u8;
            let src_b = (color.b as u16 * alpha / 255) as u8;
            let src_a = alpha as u8;
            let inv = 255 - alpha;

            let idx = ((py as u32 * width + px as u32) * 4) as usize;
            let data = pixmap.data_mut();
            data[idx] = src_r.saturating_add((data[idx] as u16 * inv / 255) as u8);
            data[idx + 1] = src_g.saturating_add((data[idx + 1] as u16 * inv / 255) as u8);
            data[idx + 2] = src_b.saturating_add((data[idx + 2] as u16 * inv / 255) as u8);
            data[idx + 3] = src_a.saturating_add((data[idx + 3] as u16 * inv / 255) as u8);
        });
    }
}
