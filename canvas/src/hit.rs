//! Hit-testing: which fixture, and which part of it, lies under a pointer.
//!
//! Bodies are tested topmost-first (reverse paint order). In
//! [`HitMode::BoundingBox`] the test ignores rotation and uses the unrotated
//! footprint; [`HitMode::Rotated`] maps the pointer into the fixture's local
//! frame first. Handles only exist on the selected fixture and sit at fixed,
//! unrotated positions.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HANDLE_SIZE, ROTATE_HANDLE_DISTANCE, ROTATE_HANDLE_RADIUS};
use crate::doc::{InstanceId, PlacedFixture, SceneDoc};
use crate::geom::{Point, Rect};
use crate::input::HitMode;

/// Which part of a fixture was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle,
    RotateHandle,
}

/// Result of a gesture hit test.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub instance_id: InstanceId,
    pub part: HitPart,
    /// Whether the fixture was already selected when hit.
    pub selected: bool,
}

/// Whether `pt` falls on the fixture's body under `mode`.
#[must_use]
pub fn body_contains(fixture: &PlacedFixture, pt: Point, mode: HitMode) -> bool {
    match mode {
        HitMode::BoundingBox => fixture.bounds().contains(pt),
        HitMode::Rotated => {
            let local = pt.rotated_around(fixture.center(), -fixture.rotation_degrees);
            fixture.bounds().contains(local)
        }
    }
}

/// Topmost fixture whose body contains `pt`.
#[must_use]
pub fn hit_test(pt: Point, doc: &SceneDoc, mode: HitMode) -> Option<&PlacedFixture> {
    doc.iter().rev().find(|f| body_contains(f, pt, mode))
}

/// Square resize handle centered on the bottom-right corner.
#[must_use]
pub fn resize_handle_rect(fixture: &PlacedFixture) -> Rect {
    Rect::centered_square(fixture.bounds().bottom_right(), HANDLE_SIZE)
}

/// Center of the rotate handle, a fixed distance above the top edge's midpoint.
#[must_use]
pub fn rotate_handle_position(fixture: &PlacedFixture) -> Point {
    Point::new(fixture.x + fixture.width / 2.0, fixture.y - ROTATE_HANDLE_DISTANCE)
}

#[must_use]
pub fn on_resize_handle(fixture: &PlacedFixture, pt: Point) -> bool {
    resize_handle_rect(fixture).contains(pt)
}

#[must_use]
pub fn on_rotate_handle(fixture: &PlacedFixture, pt: Point) -> bool {
    rotate_handle_position(fixture).distance_to(pt) <= ROTATE_HANDLE_RADIUS
}

/// Resolve a pointer-down into a gesture target.
///
/// Handles of the selected fixture win over bodies, and where handles overlap
/// (small fixtures) the resize handle wins over the rotate handle.
#[must_use]
pub fn hit_gesture(pt: Point, doc: &SceneDoc, mode: HitMode) -> Option<Hit> {
    if let Some(sel) = doc.selected() {
        if on_resize_handle(sel, pt) {
            return Some(Hit { instance_id: sel.instance_id.clone(), part: HitPart::ResizeHandle, selected: true });
        }
        if on_rotate_handle(sel, pt) {
            return Some(Hit { instance_id: sel.instance_id.clone(), part: HitPart::RotateHandle, selected: true });
        }
    }
    hit_test(pt, doc, mode).map(|f| Hit { instance_id: f.instance_id.clone(), part: HitPart::Body, selected: f.selected })
}
