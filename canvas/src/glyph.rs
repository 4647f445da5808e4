//! Fixture glyphs: simple vector icons keyed by archetype kind.
//!
//! A glyph draws inside its fixture's bounding box with the origin at the box
//! center, so the renderer can rotate it about the center with a single
//! transform. Kinds without a registered glyph fall back to a filled box.

#[cfg(test)]
#[path = "glyph_test.rs"]
mod glyph_test;

use std::collections::HashMap;

use tiny_skia::Color;

use crate::render::Painter;

/// Size and tint a glyph draws with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphBox {
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

impl GlyphBox {
    fn half(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Glyph routine: draws centered on the painter's current origin.
pub type GlyphFn = fn(&mut Painter<'_>, &GlyphBox);

/// Kind-to-glyph lookup with a rectangle fallback.
#[derive(Debug, Clone)]
pub struct GlyphRegistry {
    glyphs: HashMap<String, GlyphFn>,
}

impl Default for GlyphRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GlyphRegistry {
    /// Registry with no glyphs; everything renders as the fallback box.
    #[must_use]
    pub fn empty() -> Self {
        Self { glyphs: HashMap::new() }
    }

    /// Registry covering the stock catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let mut reg = Self::empty();
        reg.register("actor", person);
        reg.register("extra", person);
        reg.register("camera", camera);
        reg.register("camera-b", camera);
        reg.register("microphone", microphone);
        reg.register("key-light", light);
        reg.register("fill-light", light);
        reg.register("fresnel", light);
        reg.register("room", building);
        reg.register("chair", chair);
        reg.register("table", table);
        reg
    }

    /// Add or replace the glyph for `kind`.
    pub fn register(&mut self, kind: impl Into<String>, glyph: GlyphFn) {
        self.glyphs.insert(kind.into(), glyph);
    }

    #[must_use]
    pub fn is_registered(&self, kind: &str) -> bool {
        self.glyphs.contains_key(kind)
    }

    /// Glyph for `kind`, or the fallback box.
    #[must_use]
    pub fn resolve(&self, kind: &str) -> GlyphFn {
        self.glyphs.get(kind).copied().unwrap_or(fallback_box)
    }
}

fn contrast() -> Color {
    Color::from_rgba8(255, 255, 255, 220)
}

fn outline() -> Color {
    Color::from_rgba8(31, 26, 23, 255)
}

/// Filled box with a thin outline.
pub fn fallback_box(p: &mut Painter<'_>, b: &GlyphBox) {
    let (hw, hh) = b.half();
    p.fill_rect(-hw, -hh, b.width, b.height, b.color);
    p.stroke_rect(-hw, -hh, b.width, b.height, outline(), 1.0);
}

/// Head over a tapered torso.
pub fn person(p: &mut Painter<'_>, b: &GlyphBox) {
    let (hw, hh) = b.half();
    let r = b.width.min(b.height) * 0.2;
    p.fill_circle(0.0, -hh + r, r, b.color);

    let shoulders = -hh + r * 2.0 + b.height * 0.04;
    p.fill_polygon(
        &[(-hw * 0.7, shoulders), (hw * 0.7, shoulders), (hw * 0.45, hh), (-hw * 0.45, hh)],
        b.color,
    );
}

/// Film camera: two reels over a body with a lens hood.
pub fn camera(p: &mut Painter<'_>, b: &GlyphBox) {
    let (hw, hh) = b.half();
    let body_top = -hh + b.height * 0.35;
    let body_h = hh - body_top;
    let reel = b.height * 0.175;

    p.fill_circle(-hw * 0.55, -hh + reel, reel, b.color);
    p.fill_circle(-hw * 0.05, -hh + reel, reel, b.color);
    p.fill_rect(-hw, body_top, hw * 1.4, body_h, b.color);
    p.fill_polygon(
        &[(hw * 0.4, body_top + body_h * 0.3), (hw, body_top), (hw, hh), (hw * 0.4, hh - body_h * 0.3)],
        b.color,
    );
    p.fill_circle(-hw * 0.3, body_top + body_h / 2.0, body_h * 0.2, contrast());
}

/// Capsule head on a stand.
pub fn microphone(p: &mut Painter<'_>, b: &GlyphBox) {
    let (hw, hh) = b.half();
    let head_ry = b.height * 0.2;
    let base_h = b.height * 0.08;

    p.fill_ellipse(0.0, -hh + head_ry, b.width * 0.35, head_ry, b.color);
    p.stroke_line(0.0, -hh + head_ry * 2.0, 0.0, hh - base_h, b.color, (b.width * 0.12).max(2.0));
    p.fill_rect(-hw * 0.8, hh - base_h, b.width * 0.8, base_h, b.color);
}

/// Lamp head with rays over a short stand.
pub fn light(p: &mut Painter<'_>, b: &GlyphBox) {
    let (_, hh) = b.half();
    let r = b.width.min(b.height) * 0.28;
    let cy = -hh * 0.2;

    for i in 0..8 {
        let angle = f64::from(i) * std::f64::consts::FRAC_PI_4;
        let (sin, cos) = angle.sin_cos();
        p.stroke_line(cos * r * 1.25, cy + sin * r * 1.25, cos * r * 1.6, cy + sin * r * 1.6, b.color, 1.5);
    }
    p.fill_circle(0.0, cy, r, b.color);
    p.fill_rect(-r / 2.0, cy + r, r, hh * 0.85 - (cy + r), b.color);
}

/// House outline: pitched roof over walls with a door.
pub fn building(p: &mut Painter<'_>, b: &GlyphBox) {
    let (hw, hh) = b.half();
    let roof_h = b.height * 0.35;
    let eave = -hh + roof_h;
    let wall_h = b.height - roof_h;

    p.fill_polygon(&[(-hw, eave), (0.0, -hh), (hw, eave)], b.color);
    p.fill_rect(-hw * 0.85, eave, b.width * 0.85, wall_h, b.color);
    p.fill_rect(-b.width * 0.1, hh - wall_h * 0.5, b.width * 0.2, wall_h * 0.5, contrast());
}

/// Table top on two legs.
pub fn table(p: &mut Painter<'_>, b: &GlyphBox) {
    let (hw, hh) = b.half();
    let top_h = b.height * 0.3;
    let leg_w = b.width * 0.1;

    p.fill_rect(-hw, -hh, b.width, top_h, b.color);
    p.fill_rect(-hw + b.width * 0.08, -hh + top_h, leg_w, b.height - top_h, b.color);
    p.fill_rect(hw - b.width * 0.08 - leg_w, -hh + top_h, leg_w, b.height - top_h, b.color);
}

/// Side-on chair: back, seat, legs.
pub fn chair(p: &mut Painter<'_>, b: &GlyphBox) {
    let (hw, hh) = b.half();
    let seat_y = -b.height * 0.05;
    let seat_h = b.height * 0.15;
    let leg_w = b.width * 0.12;

    p.fill_rect(-hw, -hh, b.width * 0.18, seat_y + hh, b.color);
    p.fill_rect(-hw, seat_y, b.width, seat_h, b.color);
    p.fill_rect(-hw, seat_y + seat_h, leg_w, hh - seat_y - seat_h, b.color);
    p.fill_rect(hw - leg_w, seat_y + seat_h, leg_w, hh - seat_y - seat_h, b.color);
}
