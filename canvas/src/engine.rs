use tracing::{debug, trace};

use crate::catalog::FixtureArchetype;
use crate::color::canonical_hex;
use crate::consts::{MIN_SIZE, ROTATE_NUDGE_DEG};
use crate::doc::{FixturePatch, InstanceId, PlacedFixture, SceneDoc};
use crate::geom::{Point, Viewport, normalize_degrees};
use crate::glyph::{GlyphFn, GlyphRegistry};
use crate::hit::{self, HitPart};
use crate::input::{Button, HitMode, InputState, Key, Tool, UiState};
use crate::render::{self, RenderError, Surface};
use crate::sketch::{Sketch, StrokeKind};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FixtureAdded(PlacedFixture),
    FixtureUpdated { id: InstanceId, fields: FixturePatch },
    FixtureDeleted { id: InstanceId },
    SceneCleared,
    SetCursor(String),
    RenderNeeded,
}

/// Whether any action asks for a redraw.
#[must_use]
pub fn needs_render(actions: &[Action]) -> bool {
    actions.iter().any(|a| matches!(a, Action::RenderNeeded))
}

/// Core controller state: everything that doesn't depend on the raster surface.
///
/// Separated from `Engine` so it can be tested without allocating pixels.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub doc: SceneDoc,
    pub sketch: Sketch,
    pub ui: UiState,
    pub input: InputState,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Scene mutations ---

    /// Place a new fixture from archetype defaults at `(x, y)`, on top.
    pub fn add_fixture(&mut self, archetype: &FixtureArchetype, x: f64, y: f64) -> Vec<Action> {
        let placed = self.doc.place(archetype, x, y).clone();
        debug!(id = %placed.instance_id, kind = archetype.id, x, y, "fixture added");
        vec![Action::FixtureAdded(placed), Action::RenderNeeded]
    }

    /// Re-add an exported record under a fresh id, keeping its geometry,
    /// color, label and rotation.
    pub fn restore_fixture(&mut self, record: &PlacedFixture) -> Vec<Action> {
        let placed = self.doc.restore(record).clone();
        debug!(id = %placed.instance_id, from = %record.instance_id, "fixture restored");
        vec![Action::FixtureAdded(placed), Action::RenderNeeded]
    }

    /// Remove the selected fixture. No-op without a selection.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let Some(id) = self.selected_id() else {
            return Vec::new();
        };
        if self.input.captured_id() == Some(id.as_str()) {
            self.end_interaction();
        }
        if self.doc.remove(&id).is_none() {
            return Vec::new();
        }
        debug!(%id, "fixture deleted");
        vec![Action::FixtureDeleted { id }, Action::RenderNeeded]
    }

    /// Add `delta` degrees to the selected fixture's rotation, wrapped into [0, 360).
    pub fn rotate_selected_by(&mut self, delta: f64) -> Vec<Action> {
        let Some(sel) = self.doc.selected() else {
            return Vec::new();
        };
        let rotation = normalize_degrees(sel.rotation_degrees + delta);
        let patch = FixturePatch { rotation_degrees: Some(rotation), ..Default::default() };
        self.patch_selected(patch)
    }

    /// Override the selected fixture's fill. Invalid color tokens are a no-op.
    pub fn recolor_selected(&mut self, color: &str) -> Vec<Action> {
        let Some(color) = canonical_hex(color) else {
            debug!(color, "ignoring invalid fixture color");
            return Vec::new();
        };
        self.patch_selected(FixturePatch { color: Some(color), ..Default::default() })
    }

    /// Override the selected fixture's label.
    pub fn relabel_selected(&mut self, label: &str) -> Vec<Action> {
        self.patch_selected(FixturePatch { label: Some(label.to_owned()), ..Default::default() })
    }

    /// Apply a sparse update to one fixture. Stale ids and invalid colors are a no-op.
    pub fn apply_patch(&mut self, id: &str, patch: FixturePatch) -> Vec<Action> {
        if !self.doc.apply_patch(id, &patch) {
            return Vec::new();
        }
        let mut fields = patch;
        if let Some(raw) = fields.color.take() {
            fields.color = canonical_hex(&raw);
        }
        debug!(%id, ?fields, "fixture updated");
        vec![Action::FixtureUpdated { id: id.to_owned(), fields }, Action::RenderNeeded]
    }

    fn patch_selected(&mut self, patch: FixturePatch) -> Vec<Action> {
        match self.selected_id() {
            Some(id) => self.apply_patch(&id, patch),
            None => Vec::new(),
        }
    }

    /// Remove every fixture. The sketch layer is left alone.
    pub fn clear_all(&mut self) -> Vec<Action> {
        self.input = InputState::Idle;
        self.doc.clear();
        debug!("scene cleared");
        vec![Action::SceneCleared, Action::RenderNeeded]
    }

    /// Remove every sketch stroke.
    pub fn clear_sketch(&mut self) -> Vec<Action> {
        if matches!(self.input, InputState::Sketching) {
            self.input = InputState::Idle;
        }
        self.sketch.clear();
        debug!("sketch cleared");
        vec![Action::RenderNeeded]
    }

    // --- Selection ---

    /// Topmost fixture under `pt` in the current hit mode.
    #[must_use]
    pub fn hit_test(&self, pt: Point) -> Option<&PlacedFixture> {
        let hit = hit::hit_test(pt, &self.doc, self.ui.hit_mode);
        trace!(x = pt.x, y = pt.y, hit = hit.map(|f| f.instance_id.as_str()), "hit test");
        hit
    }

    /// Select the topmost fixture under `pt`, deselecting everything else.
    /// Empty space clears the selection.
    pub fn select_at(&mut self, pt: Point) -> Vec<Action> {
        let target = self.hit_test(pt).map(|f| f.instance_id.clone());
        self.select(target.as_deref())
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) -> Vec<Action> {
        self.select(None)
    }

    fn select(&mut self, id: Option<&str>) -> Vec<Action> {
        if self.doc.selected().map(|f| f.instance_id.as_str()) == id {
            return Vec::new();
        }
        self.doc.select_only(id);
        debug!(id, "selection changed");
        vec![Action::RenderNeeded]
    }

    // --- Gestures ---

    /// Capture a drag when `pt` is on an already-selected fixture.
    pub fn begin_drag(&mut self, pt: Point) -> bool {
        if !self.input.is_idle() {
            return false;
        }
        let Some((id, offset_x, offset_y)) =
            self.hit_test(pt).filter(|f| f.selected).map(|f| (f.instance_id.clone(), pt.x - f.x, pt.y - f.y))
        else {
            return false;
        };
        self.input = InputState::Dragging { id, offset_x, offset_y };
        true
    }

    /// Move the captured fixture so the pointer keeps its capture offset.
    pub fn update_drag(&mut self, pt: Point) -> bool {
        let InputState::Dragging { ref id, offset_x, offset_y } = self.input else {
            return false;
        };
        self.doc.move_to(id, pt.x - offset_x, pt.y - offset_y)
    }

    /// Capture a resize when `pt` is on the selected fixture's resize handle.
    pub fn begin_resize(&mut self, pt: Point) -> bool {
        if !self.input.is_idle() {
            return false;
        }
        let Some(sel) = self.doc.selected().filter(|f| hit::on_resize_handle(f, pt)) else {
            return false;
        };
        let corner = sel.bounds().bottom_right();
        self.input =
            InputState::Resizing { id: sel.instance_id.clone(), offset_x: pt.x - corner.x, offset_y: pt.y - corner.y };
        true
    }

    /// Resize the captured fixture, never below the minimum extent.
    pub fn update_resize(&mut self, pt: Point) -> bool {
        let InputState::Resizing { ref id, offset_x, offset_y } = self.input else {
            return false;
        };
        let Some(fixture) = self.doc.get(id) else {
            return false;
        };
        let patch = FixturePatch {
            width: Some((pt.x - fixture.x - offset_x).max(MIN_SIZE)),
            height: Some((pt.y - fixture.y - offset_y).max(MIN_SIZE)),
            ..Default::default()
        };
        self.doc.apply_patch(id, &patch)
    }

    /// Capture a rotation when `pt` is on the selected fixture's rotate handle.
    pub fn begin_rotate(&mut self, pt: Point) -> bool {
        if !self.input.is_idle() {
            return false;
        }
        let Some(sel) = self.doc.selected().filter(|f| hit::on_rotate_handle(f, pt)) else {
            return false;
        };
        self.input = InputState::Rotating { id: sel.instance_id.clone() };
        true
    }

    /// Point the captured fixture's top at the pointer. The handle's rest
    /// position (straight up) is 0 degrees.
    pub fn update_rotate(&mut self, pt: Point) -> bool {
        let InputState::Rotating { ref id } = self.input else {
            return false;
        };
        let Some(fixture) = self.doc.get(id) else {
            return false;
        };
        let c = fixture.center();
        let degrees = (pt.y - c.y).atan2(pt.x - c.x).to_degrees() + 90.0;
        let patch = FixturePatch { rotation_degrees: Some(normalize_degrees(degrees)), ..Default::default() };
        self.doc.apply_patch(id, &patch)
    }

    /// Release any gesture capture.
    pub fn end_interaction(&mut self) {
        self.input = InputState::Idle;
    }

    // --- Tools ---

    /// Switch tools. Any in-progress gesture is released.
    pub fn set_tool(&mut self, tool: Tool) {
        self.end_interaction();
        self.ui.tool = tool;
    }

    /// Set the pen color for new strokes. Returns false for invalid tokens.
    pub fn set_pen_color(&mut self, color: &str) -> bool {
        let Some(color) = canonical_hex(color) else {
            return false;
        };
        self.ui.pen_color = color;
        true
    }

    pub fn set_hit_mode(&mut self, mode: HitMode) {
        self.ui.hit_mode = mode;
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        if !self.input.is_idle() {
            self.end_interaction();
        }

        if self.ui.tool.is_sketch() {
            let kind = if self.ui.tool == Tool::Eraser { StrokeKind::Eraser } else { StrokeKind::Pen };
            self.sketch.begin(kind, &self.ui.pen_color, pt);
            self.input = InputState::Sketching;
            return vec![Action::RenderNeeded];
        }

        let Some(target) = hit::hit_gesture(pt, &self.doc, self.ui.hit_mode) else {
            trace!(x = pt.x, y = pt.y, "pointer down on empty space");
            return self.clear_selection();
        };
        trace!(id = %target.instance_id, part = ?target.part, "pointer down");

        match target.part {
            HitPart::ResizeHandle if self.begin_resize(pt) => vec![cursor("nwse-resize")],
            HitPart::RotateHandle if self.begin_rotate(pt) => vec![cursor("grabbing")],
            HitPart::Body if target.selected && self.begin_drag(pt) => vec![cursor("move")],
            HitPart::Body => self.select(Some(&target.instance_id)),
            HitPart::ResizeHandle | HitPart::RotateHandle => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let changed = match self.input {
            InputState::Idle => return vec![cursor(self.hover_cursor(pt))],
            InputState::Dragging { .. } => self.update_drag(pt),
            InputState::Resizing { .. } => self.update_resize(pt),
            InputState::Rotating { .. } => self.update_rotate(pt),
            InputState::Sketching => self.sketch.extend(pt),
        };
        if changed { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    pub fn on_pointer_up(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let mut actions = Vec::new();
        match self.input {
            InputState::Idle => return actions,
            InputState::Sketching => {
                self.sketch.extend(pt);
                actions.push(Action::RenderNeeded);
            }
            InputState::Dragging { ref id, .. } => {
                if let Some(f) = self.doc.get(id) {
                    let fields = FixturePatch { x: Some(f.x), y: Some(f.y), ..Default::default() };
                    actions.push(Action::FixtureUpdated { id: id.clone(), fields });
                }
            }
            InputState::Resizing { ref id, .. } => {
                if let Some(f) = self.doc.get(id) {
                    let fields = FixturePatch { width: Some(f.width), height: Some(f.height), ..Default::default() };
                    actions.push(Action::FixtureUpdated { id: id.clone(), fields });
                }
            }
            InputState::Rotating { ref id } => {
                if let Some(f) = self.doc.get(id) {
                    let fields = FixturePatch { rotation_degrees: Some(f.rotation_degrees), ..Default::default() };
                    actions.push(Action::FixtureUpdated { id: id.clone(), fields });
                }
            }
        }
        self.end_interaction();
        actions.push(cursor(self.hover_cursor(pt)));
        actions
    }

    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        if key.is_delete() {
            self.delete_selected()
        } else if key.is_rotate_nudge() {
            self.rotate_selected_by(ROTATE_NUDGE_DEG)
        } else if key.is_escape() {
            self.end_interaction();
            self.clear_selection()
        } else {
            Vec::new()
        }
    }

    fn hover_cursor(&self, pt: Point) -> &'static str {
        if self.ui.tool.is_sketch() {
            return "crosshair";
        }
        match hit::hit_gesture(pt, &self.doc, self.ui.hit_mode) {
            Some(h) if h.part == HitPart::ResizeHandle => "nwse-resize",
            Some(h) if h.part == HitPart::RotateHandle => "grab",
            Some(h) if h.selected => "move",
            Some(_) => "pointer",
            None => "default",
        }
    }

    // --- Queries ---

    /// Id of the selected fixture, if any.
    #[must_use]
    pub fn selected_id(&self) -> Option<InstanceId> {
        self.doc.selected().map(|f| f.instance_id.clone())
    }

    /// Look up a fixture by id.
    #[must_use]
    pub fn fixture(&self, id: &str) -> Option<&PlacedFixture> {
        self.doc.get(id)
    }

    /// Plain-data snapshot of the scene in paint order.
    #[must_use]
    pub fn export_instance_list(&self) -> Vec<PlacedFixture> {
        self.doc.snapshot()
    }
}

fn cursor(name: &str) -> Action {
    Action::SetCursor(name.to_owned())
}

/// The full controller. Wraps `EngineCore` and owns the raster surface.
#[derive(Debug)]
pub struct Engine {
    surface: Surface,
    glyphs: GlyphRegistry,
    viewport: Viewport,
    pub core: EngineCore,
}

impl Engine {
    /// Create a controller with a blank `width` x `height` surface.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SurfaceAlloc`] if the surface cannot be allocated.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let mut engine = Self {
            surface: Surface::new(width, height)?,
            glyphs: GlyphRegistry::builtin(),
            viewport: Viewport::new(f64::from(width), f64::from(height)),
            core: EngineCore::new(),
        };
        engine.render();
        Ok(engine)
    }

    fn commit(&mut self, actions: Vec<Action>) -> Vec<Action> {
        if needs_render(&actions) {
            self.render();
        }
        actions
    }

    // --- Delegated mutations ---

    pub fn add_fixture(&mut self, archetype: &FixtureArchetype, x: f64, y: f64) -> Vec<Action> {
        let actions = self.core.add_fixture(archetype, x, y);
        self.commit(actions)
    }

    pub fn restore_fixture(&mut self, record: &PlacedFixture) -> Vec<Action> {
        let actions = self.core.restore_fixture(record);
        self.commit(actions)
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        let actions = self.core.delete_selected();
        self.commit(actions)
    }

    pub fn rotate_selected_by(&mut self, delta: f64) -> Vec<Action> {
        let actions = self.core.rotate_selected_by(delta);
        self.commit(actions)
    }

    pub fn recolor_selected(&mut self, color: &str) -> Vec<Action> {
        let actions = self.core.recolor_selected(color);
        self.commit(actions)
    }

    pub fn relabel_selected(&mut self, label: &str) -> Vec<Action> {
        let actions = self.core.relabel_selected(label);
        self.commit(actions)
    }

    pub fn select_at(&mut self, pt: Point) -> Vec<Action> {
        let actions = self.core.select_at(pt);
        self.commit(actions)
    }

    pub fn clear_all(&mut self) -> Vec<Action> {
        let actions = self.core.clear_all();
        self.commit(actions)
    }

    pub fn clear_sketch(&mut self) -> Vec<Action> {
        let actions = self.core.clear_sketch();
        self.commit(actions)
    }

    /// Wipe the whole panel: fixtures, sketch strokes and the backdrop image.
    pub fn clear_canvas(&mut self) -> Vec<Action> {
        self.surface.clear_backdrop();
        let mut actions = self.core.clear_all();
        actions.extend(self.core.clear_sketch());
        self.commit(actions)
    }

    // --- Backdrop ---

    /// Load a PNG as the panel backdrop, stretched to the canvas size.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Decode`] if the bytes are not a readable PNG.
    /// The scene and any previous backdrop are left untouched.
    pub fn import_image(&mut self, png: &[u8]) -> Result<Vec<Action>, RenderError> {
        self.surface.set_backdrop_png(png)?;
        debug!(width = self.surface.width(), height = self.surface.height(), "backdrop imported");
        Ok(self.commit(vec![Action::RenderNeeded]))
    }

    pub fn clear_image(&mut self) -> Vec<Action> {
        if !self.surface.has_backdrop() {
            return Vec::new();
        }
        self.surface.clear_backdrop();
        self.commit(vec![Action::RenderNeeded])
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.core.set_tool(tool);
    }

    pub fn set_pen_color(&mut self, color: &str) -> bool {
        self.core.set_pen_color(color)
    }

    pub fn set_hit_mode(&mut self, mode: HitMode) {
        self.core.set_hit_mode(mode);
    }

    /// Add or replace the glyph drawn for a fixture kind.
    pub fn register_glyph(&mut self, kind: impl Into<String>, glyph: GlyphFn) {
        self.glyphs.register(kind, glyph);
        self.render();
    }

    // --- Viewport ---

    /// Record the size the surface is displayed at, for pointer scaling.
    pub fn set_display_size(&mut self, width: f64, height: f64) {
        self.viewport.set_display_size(width, height);
    }

    /// Scale a display-space point into canvas pixels.
    #[must_use]
    pub fn to_canvas(&self, display_pt: Point) -> Point {
        self.viewport.to_canvas(display_pt)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action> {
        let actions = self.core.on_pointer_down(pt, button);
        self.commit(actions)
    }

    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_move(pt);
        self.commit(actions)
    }

    pub fn on_pointer_up(&mut self, pt: Point, button: Button) -> Vec<Action> {
        let actions = self.core.on_pointer_up(pt, button);
        self.commit(actions)
    }

    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        let actions = self.core.on_key_down(key);
        self.commit(actions)
    }

    // --- Render ---

    /// Redraw the full scene onto the surface.
    pub fn render(&mut self) {
        render::draw(&mut self.surface, &self.core.doc, &self.core.sketch, &self.glyphs);
    }

    /// Raw premultiplied RGBA8 pixels of the last frame.
    #[must_use]
    pub fn rendered_bitmap(&self) -> &[u8] {
        self.surface.bitmap()
    }

    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Encode the last frame as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Encode`] if the encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.surface.encode_png()
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selected_id(&self) -> Option<InstanceId> {
        self.core.selected_id()
    }

    #[must_use]
    pub fn fixture(&self, id: &str) -> Option<&PlacedFixture> {
        self.core.fixture(id)
    }

    #[must_use]
    pub fn export_instance_list(&self) -> Vec<PlacedFixture> {
        self.core.export_instance_list()
    }
}
