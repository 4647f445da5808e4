//! Document model: placed fixtures and the ordered store that owns them.
//!
//! `PlacedFixture` is the mutable, scene-owned instance derived from a catalog
//! archetype. `FixturePatch` is a sparse update for incremental edits, and
//! `SceneDoc` is the runtime store. Store order is paint order: later entries
//! draw on top and are hit-tested first.
//!
//! The store enforces the scene invariants on every write path: extents never
//! drop below [`MIN_SIZE`], rotation stays in `[0, 360)`, at most one fixture
//! is selected, and instance ids are never reused.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::catalog::{self, FixtureArchetype};
use crate::color::canonical_hex;
use crate::consts::{FALLBACK_FIXTURE_COLOR, MIN_SIZE};
use crate::geom::{Point, Rect, normalize_degrees};

/// Unique identifier for a placed fixture.
pub type InstanceId = String;

/// A fixture placed on the canvas, as held in the scene and exported to hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedFixture {
    /// Unique per placement.
    pub instance_id: InstanceId,
    /// Id of the originating archetype; selects the draw routine.
    pub archetype_kind: String,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Fill color token.
    pub color: String,
    /// Text drawn under the icon.
    pub label: String,
    /// Clockwise rotation around the box center, in `[0, 360)`.
    pub rotation_degrees: f64,
    pub selected: bool,
}

impl PlacedFixture {
    /// Unrotated footprint.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}

/// Sparse update for a placed fixture. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixturePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Clamped to [`MIN_SIZE`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Clamped to [`MIN_SIZE`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Wrapped into `[0, 360)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_degrees: Option<f64>,
    /// Must be a `#rgb` or `#rrggbb` token; stored canonical.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Clamp an extent to the minimum fixture size. Non-finite values clamp too.
#[must_use]
pub fn clamp_extent(value: f64) -> f64 {
    if value.is_finite() { value.max(MIN_SIZE) } else { MIN_SIZE }
}

fn restored_color(record: &PlacedFixture) -> String {
    canonical_hex(&record.color).unwrap_or_else(|| {
        catalog::get(&record.archetype_kind)
            .map_or(FALLBACK_FIXTURE_COLOR, |a| a.default_color)
            .to_owned()
    })
}

/// Ordered, exclusively-owned list of placed fixtures.
#[derive(Debug, Default)]
pub struct SceneDoc {
    fixtures: Vec<PlacedFixture>,
    next_seq: u64,
}

impl SceneDoc {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh instance id for `archetype_id`.
    ///
    /// Ids combine the archetype id, the creation time in Unix milliseconds and
    /// a per-scene sequence number, so two placements in the same millisecond
    /// still differ.
    pub fn next_instance_id(&mut self, archetype_id: &str) -> InstanceId {
        let seq = self.next_seq;
        self.next_seq += 1;
        format!("{archetype_id}-{}-{seq}", unix_millis())
    }

    /// Build a fixture from archetype defaults at `(x, y)` and append it on top.
    pub fn place(&mut self, archetype: &FixtureArchetype, x: f64, y: f64) -> &PlacedFixture {
        let fixture = PlacedFixture {
            instance_id: self.next_instance_id(archetype.id),
            archetype_kind: archetype.id.to_owned(),
            x,
            y,
            width: clamp_extent(archetype.default_width),
            height: clamp_extent(archetype.default_height),
            color: archetype.default_color.to_owned(),
            label: archetype.name.to_owned(),
            rotation_degrees: 0.0,
            selected: false,
        };
        self.push_top(fixture)
    }

    /// Re-add an exported record on top under a fresh id, keeping its geometry,
    /// color, label and rotation. The copy is never selected.
    ///
    /// Colors are canonicalized; an unparseable color falls back to the
    /// archetype's default, or to [`FALLBACK_FIXTURE_COLOR`] for unknown kinds.
    pub fn restore(&mut self, record: &PlacedFixture) -> &PlacedFixture {
        let fixture = PlacedFixture {
            instance_id: self.next_instance_id(&record.archetype_kind),
            archetype_kind: record.archetype_kind.clone(),
            x: record.x,
            y: record.y,
            width: clamp_extent(record.width),
            height: clamp_extent(record.height),
            color: restored_color(record),
            label: record.label.clone(),
            rotation_degrees: normalize_degrees(record.rotation_degrees),
            selected: false,
        };
        self.push_top(fixture)
    }

    fn push_top(&mut self, fixture: PlacedFixture) -> &PlacedFixture {
        self.fixtures.push(fixture);
        let last = self.fixtures.len() - 1;
        &self.fixtures[last]
    }

    /// Remove a fixture by id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<PlacedFixture> {
        let idx = self.fixtures.iter().position(|f| f.instance_id == id)?;
        Some(self.fixtures.remove(idx))
    }

    /// Return a reference to a fixture by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PlacedFixture> {
        self.fixtures.iter().find(|f| f.instance_id == id)
    }

    /// Move a fixture's top-left corner. Returns false if the id is stale.
    pub fn move_to(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.apply_patch(id, &FixturePatch { x: Some(x), y: Some(y), ..Default::default() })
    }

    /// Apply a sparse update. Returns false, changing nothing, if the id is
    /// stale or the patch carries an unparseable color.
    pub fn apply_patch(&mut self, id: &str, patch: &FixturePatch) -> bool {
        let color = match patch.color.as_deref() {
            Some(raw) => match canonical_hex(raw) {
                Some(c) => Some(c),
                None => return false,
            },
            None => None,
        };
        let Some(fixture) = self.fixtures.iter_mut().find(|f| f.instance_id == id) else {
            return false;
        };
        if let Some(x) = patch.x {
            fixture.x = x;
        }
        if let Some(y) = patch.y {
            fixture.y = y;
        }
        if let Some(w) = patch.width {
            fixture.width = clamp_extent(w);
        }
        if let Some(h) = patch.height {
            fixture.height = clamp_extent(h);
        }
        if let Some(r) = patch.rotation_degrees {
            fixture.rotation_degrees = normalize_degrees(r);
        }
        if let Some(c) = color {
            fixture.color = c;
        }
        if let Some(ref label) = patch.label {
            fixture.label.clone_from(label);
        }
        true
    }

    /// Mark exactly the fixture with `id` as selected and clear every other
    /// flag. `None` (or a stale id) clears the selection.
    pub fn select_only(&mut self, id: Option<&str>) {
        for fixture in &mut self.fixtures {
            fixture.selected = Some(fixture.instance_id.as_str()) == id;
        }
    }

    /// The selected fixture, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&PlacedFixture> {
        self.fixtures.iter().find(|f| f.selected)
    }

    /// Fixtures in paint order (bottom first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PlacedFixture> {
        self.fixtures.iter()
    }

    /// Plain-data copy of the scene in paint order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PlacedFixture> {
        self.fixtures.clone()
    }

    /// Remove every fixture. Sequence numbers keep counting so ids stay unique
    /// for the lifetime of the scene.
    pub fn clear(&mut self) {
        self.fixtures.clear();
    }

    /// Number of fixtures currently in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    /// Returns `true` if the scene contains no fixtures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}

fn unix_millis() -> u128 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis(),
        Err(_) => 0,
    }
}
