//! Fixture labels rasterized with a system sans-serif face.
//!
//! The face is resolved once per process. Hosts without any usable font still
//! render, just without label text; a warning is logged the first time.

use std::sync::OnceLock;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::{Font, Scale, point};
use tiny_skia::{Color, Pixmap};
use tracing::warn;

/// Label text height in pixels.
pub const LABEL_SIZE_PX: f32 = 12.0;

static LABEL_FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();

/// Shared label face, loaded on first use.
pub fn label_font() -> Option<&'static Font<'static>> {
    LABEL_FONT.get_or_init(load_sans_serif).as_ref()
}

fn load_sans_serif() -> Option<Font<'static>> {
    let mut db = Database::new();
    db.load_system_fonts();

    let query = Query {
        families: &[Family::SansSerif],
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let font = db
        .query(&query)
        .or_else(|| db.faces().next().map(|face| face.id))
        .and_then(|id| db.with_face_data(id, |data, index| Font::try_from_vec_and_index(data.to_vec(), index)))
        .flatten();

    if font.is_none() {
        warn!(faces = db.len(), "no usable system font; fixture labels will not be drawn");
    }
    font
}

/// Draw `text` horizontally centered on `center_x` with its top at `top_y`.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn draw_label(pixmap: &mut Pixmap, font: &Font<'_>, text: &str, center_x: f64, top_y: f64, color: Color) {
    if text.is_empty() {
        return;
    }

    let scale = Scale::uniform(LABEL_SIZE_PX);
    let ascent = font.v_metrics(scale).ascent;
    let text_width = font
        .layout(text, scale, point(0.0, 0.0))
        .last()
        .map_or(0.0, |g| g.position().x + g.unpositioned().h_metrics().advance_width);
    let origin = point(center_x as f32 - text_width / 2.0, top_y as f32 + ascent);

    let width = i64::from(pixmap.width());
    let height = i64::from(pixmap.height());
    let src = color.premultiply().to_color_u8();
    let src = [src.red(), src.green(), src.blue(), src.alpha()];
    let data = pixmap.data_mut();

    for glyph in font.layout(text, scale, origin) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let x = i64::from(bb.min.x) + i64::from(gx);
            let y = i64::from(bb.min.y) + i64::from(gy);
            if x < 0 || y < 0 || x >= width || y >= height {
                return;
            }
            let idx = ((y * width + x) * 4) as usize;
            let a = coverage.clamp(0.0, 1.0);
            for (dst, s) in data[idx..idx + 4].iter_mut().zip(src) {
                *dst = (f32::from(s) * a + f32::from(*dst) * (1.0 - a)).round() as u8;
            }
        });
    }
}
