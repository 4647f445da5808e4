use super::*;
use crate::catalog;
use tiny_skia::Pixmap;

fn paint(glyph: GlyphFn, width: f64, height: f64) -> Pixmap {
    let mut pixmap = Pixmap::new(120, 120).unwrap();
    let mut painter = Painter::new(&mut pixmap);
    painter.translate(60.0, 60.0);
    glyph(&mut painter, &GlyphBox { width, height, color: Color::BLACK });
    pixmap
}

fn inked(pixmap: &Pixmap) -> usize {
    pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
}

fn inked_outside(pixmap: &Pixmap, width: f64, height: f64) -> usize {
    let (x0, y0) = (60.0 - width / 2.0 - 2.0, 60.0 - height / 2.0 - 2.0);
    let (x1, y1) = (60.0 + width / 2.0 + 2.0, 60.0 + height / 2.0 + 2.0);
    let mut count = 0;
    for y in 0..pixmap.height() {
        for x in 0..pixmap.width() {
            let (fx, fy) = (f64::from(x), f64::from(y));
            let inside = fx >= x0 && fx < x1 && fy >= y0 && fy < y1;
            if !inside && pixmap.pixel(x, y).is_some_and(|p| p.alpha() > 0) {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn builtin_covers_every_glyph_family() {
    let reg = GlyphRegistry::builtin();
    for kind in ["actor", "extra", "camera", "camera-b", "microphone", "key-light", "fill-light", "fresnel", "room", "chair", "table"] {
        assert!(reg.is_registered(kind), "{kind} has no glyph");
    }
}

#[test]
fn unknown_kind_is_not_registered() {
    let reg = GlyphRegistry::builtin();
    assert!(!reg.is_registered("vehicle"));
    assert!(!reg.is_registered("spaceship"));
    assert!(catalog::get("vehicle").is_some());
}

#[test]
fn empty_registry_resolves_to_fallback_box() {
    let reg = GlyphRegistry::empty();
    let pixmap = paint(reg.resolve("actor"), 40.0, 20.0);
    // The fallback fills its whole box.
    assert_eq!(pixmap.pixel(60, 60).unwrap().alpha(), 255);
    assert_eq!(pixmap.pixel(42, 52).unwrap().alpha(), 255);
    assert_eq!(pixmap.pixel(60, 75).unwrap().alpha(), 0);
}

#[test]
fn register_replaces_glyph() {
    fn nothing(_: &mut Painter<'_>, _: &GlyphBox) {}

    let mut reg = GlyphRegistry::builtin();
    reg.register("actor", nothing);
    assert_eq!(inked(&paint(reg.resolve("actor"), 50.0, 80.0)), 0);
}

#[test]
fn every_catalog_glyph_draws_within_its_box() {
    let reg = GlyphRegistry::builtin();
    for arch in catalog::list_all() {
        let (w, h) = (arch.default_width, arch.default_height);
        let pixmap = paint(reg.resolve(arch.id), w, h);
        assert!(inked(&pixmap) > 0, "{} drew nothing", arch.id);
        assert_eq!(inked_outside(&pixmap, w, h), 0, "{} spilled outside its box", arch.id);
    }
}
