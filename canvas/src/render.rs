//! Rendering: paints the full scene onto the raster surface.
//!
//! This module owns the [`Surface`] and is the only place that writes pixels.
//! It receives read-only views of the scene and sketch state and never mutates
//! them. [`Painter`] gives glyph routines a save/restore transform stack over
//! the pixmap so each glyph draws in its own centered, rotated frame.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt;

use tiny_skia::{
    BlendMode, Color, FillRule, FilterQuality, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapPaint,
    Rect as SkRect, Stroke, StrokeDash, Transform,
};

use crate::color::paint_color;
use crate::consts::BACKGROUND_COLOR;
use crate::doc::{PlacedFixture, SceneDoc};
use crate::glyph::{GlyphBox, GlyphRegistry};
use crate::hit;
use crate::label;
use crate::sketch::{Sketch, SketchStroke, StrokeKind};

/// Selection dash segment length in pixels.
const SELECTION_DASH_PX: f32 = 4.0;

/// Drawn radius of the rotate handle glyph (the armable radius is larger).
const ROTATE_GLYPH_RADIUS: f64 = 5.0;

/// Gap between a fixture's bottom edge and the top of its label.
const LABEL_GAP_PX: f64 = 4.0;

/// Selection chrome color (#1e90ff).
fn selection_color() -> Color {
    Color::from_rgba8(30, 144, 255, 255)
}

/// Label text color (#333333).
fn label_color() -> Color {
    Color::from_rgba8(51, 51, 51, 255)
}

/// Errors from the fallible surface paths.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} surface")]
    SurfaceAlloc { width: u32, height: u32 },
    #[error("png encoding failed: {0}")]
    Encode(String),
    #[error("png decoding failed: {0}")]
    Decode(String),
}

/// The raster surface: the composited frame, the offscreen sketch layer and
/// an optional imported backdrop image.
pub struct Surface {
    pixmap: Pixmap,
    sketch_layer: Pixmap,
    backdrop: Option<Pixmap>,
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("backdrop", &self.backdrop.as_ref().map(|b| (b.width(), b.height())))
            .finish()
    }
}

impl Surface {
    /// Allocate a blank surface.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SurfaceAlloc`] for zero or oversized dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let alloc = || Pixmap::new(width, height).ok_or(RenderError::SurfaceAlloc { width, height });
        let mut pixmap = alloc()?;
        pixmap.fill(background());
        Ok(Self { pixmap, sketch_layer: alloc()?, backdrop: None })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Raw premultiplied RGBA8 bytes, row-major, no padding.
    #[must_use]
    pub fn bitmap(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight (non-premultiplied) RGBA of one pixel.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Decode a PNG and keep it as the backdrop. It is stretched over the
    /// whole surface on the next draw, under the sketch and the fixtures.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Decode`] if the bytes are not a readable PNG.
    /// The previous backdrop is kept in that case.
    pub fn set_backdrop_png(&mut self, bytes: &[u8]) -> Result<(), RenderError> {
        let image = Pixmap::decode_png(bytes).map_err(|e| RenderError::Decode(e.to_string()))?;
        self.backdrop = Some(image);
        Ok(())
    }

    pub fn clear_backdrop(&mut self) {
        self.backdrop = None;
    }

    #[must_use]
    pub fn has_backdrop(&self) -> bool {
        self.backdrop.is_some()
    }

    /// Encode the current frame as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Encode`] if the encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap.encode_png().map_err(|e| RenderError::Encode(e.to_string()))
    }
}

/// Draw the full scene: background, backdrop image, sketch layer, fixtures
/// with labels, then selection chrome.
pub fn draw(surface: &mut Surface, doc: &SceneDoc, sketch: &Sketch, glyphs: &GlyphRegistry) {
    let Surface { pixmap, sketch_layer, backdrop } = surface;

    // Layer 1: background.
    pixmap.fill(background());

    // Layer 2: imported image, scaled to fill the frame.
    if let Some(image) = backdrop {
        draw_backdrop(pixmap, image);
    }

    // Layer 3: sketch strokes, composited so the eraser only clears strokes.
    sketch_layer.fill(Color::TRANSPARENT);
    for stroke in sketch.strokes() {
        draw_stroke(sketch_layer, stroke);
    }
    pixmap.draw_pixmap(0, 0, sketch_layer.as_ref(), &PixmapPaint::default(), Transform::identity(), None);

    // Layer 4: fixtures in paint order.
    let font = label::label_font();
    for fixture in doc.iter() {
        draw_fixture(pixmap, fixture, glyphs);
        if let Some(font) = font {
            let bounds = fixture.bounds();
            label::draw_label(
                pixmap,
                font,
                &fixture.label,
                bounds.center().x,
                bounds.y + bounds.height + LABEL_GAP_PX,
                label_color(),
            );
        }
    }

    // Layer 5: selection UI.
    if let Some(sel) = doc.selected() {
        draw_selection(pixmap, sel);
    }
}

#[allow(clippy::cast_precision_loss)]
fn draw_backdrop(pixmap: &mut Pixmap, image: &Pixmap) {
    let transform = Transform::from_scale(
        pixmap.width() as f32 / image.width() as f32,
        pixmap.height() as f32 / image.height() as f32,
    );
    let paint = PixmapPaint { quality: FilterQuality::Bilinear, ..PixmapPaint::default() };
    pixmap.draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
}

// =============================================================
// Fixtures
// =============================================================

fn draw_fixture(pixmap: &mut Pixmap, fixture: &PlacedFixture, glyphs: &GlyphRegistry) {
    let center = fixture.center();
    let glyph_box = GlyphBox {
        width: fixture.width,
        height: fixture.height,
        color: paint_color(&fixture.color, Color::BLACK),
    };
    let glyph = glyphs.resolve(&fixture.archetype_kind);

    let mut painter = Painter::new(pixmap);
    painter.save();
    painter.translate(center.x, center.y);
    painter.rotate(fixture.rotation_degrees);
    glyph(&mut painter, &glyph_box);
    painter.restore();
}

fn draw_selection(pixmap: &mut Pixmap, fixture: &PlacedFixture) {
    let bounds = fixture.bounds();
    let blue = selection_color();
    let mut painter = Painter::new(pixmap);

    painter.dashed_rect(bounds.x, bounds.y, bounds.width, bounds.height, blue, 1.0, SELECTION_DASH_PX);

    // Rotate handle with its stem from the top edge.
    let rh = hit::rotate_handle_position(fixture);
    painter.stroke_line(rh.x, bounds.y, rh.x, rh.y + ROTATE_GLYPH_RADIUS, blue, 1.0);
    painter.fill_circle(rh.x, rh.y, ROTATE_GLYPH_RADIUS, Color::WHITE);
    painter.stroke_circle(rh.x, rh.y, ROTATE_GLYPH_RADIUS, blue, 1.0);

    // Resize handle.
    let rs = hit::resize_handle_rect(fixture);
    painter.fill_rect(rs.x, rs.y, rs.width, rs.height, Color::WHITE);
    painter.stroke_rect(rs.x, rs.y, rs.width, rs.height, blue, 1.0);
}

// =============================================================
// Sketch
// =============================================================

fn draw_stroke(layer: &mut Pixmap, stroke: &SketchStroke) {
    let mut paint = Paint::default();
    paint.anti_alias = true;
    match stroke.kind {
        StrokeKind::Pen => paint.set_color(paint_color(&stroke.color, Color::BLACK)),
        StrokeKind::Eraser => {
            paint.set_color(Color::BLACK);
            paint.blend_mode = BlendMode::DestinationOut;
        }
    }

    // A click without movement still leaves a dot.
    if let [only] = stroke.points.as_slice() {
        if let Some(dot) = PathBuilder::from_circle(px(only.x), px(only.y), px(stroke.width / 2.0)) {
            layer.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
        }
        return;
    }

    let mut pb = PathBuilder::new();
    for (i, pt) in stroke.points.iter().enumerate() {
        if i == 0 {
            pb.move_to(px(pt.x), px(pt.y));
        } else {
            pb.line_to(px(pt.x), px(pt.y));
        }
    }
    let Some(path) = pb.finish() else {
        return;
    };
    let sk_stroke = Stroke {
        width: px(stroke.width),
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    layer.stroke_path(&path, &paint, &sk_stroke, Transform::identity(), None);
}

// =============================================================
// Painter
// =============================================================

/// Transform-stack drawing helper over a pixmap, in the manner of a 2D canvas
/// context. All coordinates are in the current (possibly rotated) frame.
pub struct Painter<'a> {
    pixmap: &'a mut Pixmap,
    transform: Transform,
    stack: Vec<Transform>,
}

impl fmt::Debug for Painter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Painter").field("transform", &self.transform).finish_non_exhaustive()
    }
}

impl<'a> Painter<'a> {
    #[must_use]
    pub fn new(pixmap: &'a mut Pixmap) -> Self {
        Self { pixmap, transform: Transform::identity(), stack: Vec::new() }
    }

    /// Push the current transform.
    pub fn save(&mut self) {
        self.stack.push(self.transform);
    }

    /// Pop back to the last saved transform. Unbalanced calls reset to identity.
    pub fn restore(&mut self) {
        self.transform = self.stack.pop().unwrap_or_else(Transform::identity);
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform.pre_translate(px(dx), px(dy));
    }

    /// Rotate the frame clockwise by `degrees`.
    pub fn rotate(&mut self, degrees: f64) {
        self.transform = self.transform.pre_concat(Transform::from_rotate(px(degrees)));
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        if let Some(rect) = sk_rect(x, y, w, h) {
            self.fill(&PathBuilder::from_rect(rect), color);
        }
    }

    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, width: f64) {
        if let Some(rect) = sk_rect(x, y, w, h) {
            self.stroke(&PathBuilder::from_rect(rect), color, width, None);
        }
    }

    pub fn dashed_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, width: f64, dash: f32) {
        if let Some(rect) = sk_rect(x, y, w, h) {
            self.stroke(&PathBuilder::from_rect(rect), color, width, StrokeDash::new(vec![dash, dash], 0.0));
        }
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color) {
        if let Some(path) = PathBuilder::from_circle(px(cx), px(cy), px(r)) {
            self.fill(&path, color);
        }
    }

    pub fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color, width: f64) {
        if let Some(path) = PathBuilder::from_circle(px(cx), px(cy), px(r)) {
            self.stroke(&path, color, width, None);
        }
    }

    pub fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Color) {
        if let Some(path) = sk_rect(cx - rx, cy - ry, rx * 2.0, ry * 2.0).and_then(PathBuilder::from_oval) {
            self.fill(&path, color);
        }
    }

    /// Fill a closed polygon through `points`.
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color) {
        let mut pb = PathBuilder::new();
        for (i, &(x, y)) in points.iter().enumerate() {
            if i == 0 {
                pb.move_to(px(x), px(y));
            } else {
                pb.line_to(px(x), px(y));
            }
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.fill(&path, color);
        }
    }

    pub fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color, width: f64) {
        let mut pb = PathBuilder::new();
        pb.move_to(px(x0), px(y0));
        pb.line_to(px(x1), px(y1));
        if let Some(path) = pb.finish() {
            self.stroke(&path, color, width, None);
        }
    }

    fn fill(&mut self, path: &Path, color: Color) {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        self.pixmap.fill_path(path, &paint, FillRule::Winding, self.transform, None);
    }

    fn stroke(&mut self, path: &Path, color: Color, width: f64, dash: Option<StrokeDash>) {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        let stroke = Stroke { width: px(width), dash, ..Default::default() };
        self.pixmap.stroke_path(path, &paint, &stroke, self.transform, None);
    }
}

// =============================================================
// Helpers
// =============================================================

fn background() -> Color {
    paint_color(BACKGROUND_COLOR, Color::WHITE)
}

fn sk_rect(x: f64, y: f64, w: f64, h: f64) -> Option<SkRect> {
    SkRect::from_xywh(px(x), px(y), px(w), px(h))
}

/// Narrow a canvas coordinate to the rasterizer's precision.
#[allow(clippy::cast_possible_truncation)]
fn px(v: f64) -> f32 {
    v as f32
}
