#![allow(clippy::float_cmp)]

use super::*;
use crate::catalog;

fn camera() -> &'static FixtureArchetype {
    catalog::get("camera").unwrap()
}

fn place_camera(doc: &mut SceneDoc, x: f64, y: f64) -> InstanceId {
    doc.place(camera(), x, y).instance_id.clone()
}

// =============================================================
// place
// =============================================================

#[test]
fn place_uses_archetype_defaults() {
    let mut doc = SceneDoc::new();
    let f = doc.place(camera(), 100.0, 120.0).clone();
    assert_eq!(f.archetype_kind, "camera");
    assert_eq!((f.x, f.y), (100.0, 120.0));
    assert_eq!((f.width, f.height), (60.0, 40.0));
    assert_eq!(f.color, "#000000");
    assert_eq!(f.label, "Camera");
    assert_eq!(f.rotation_degrees, 0.0);
    assert!(!f.selected);
}

#[test]
fn place_appends_in_paint_order() {
    let mut doc = SceneDoc::new();
    let a = place_camera(&mut doc, 0.0, 0.0);
    let b = place_camera(&mut doc, 5.0, 5.0);
    let c = place_camera(&mut doc, 9.0, 9.0);
    let order: Vec<&str> = doc.iter().map(|f| f.instance_id.as_str()).collect();
    assert_eq!(order, [a.as_str(), b.as_str(), c.as_str()]);
}

#[test]
fn instance_ids_are_unique_for_same_archetype() {
    let mut doc = SceneDoc::new();
    let a = place_camera(&mut doc, 10.0, 10.0);
    let b = place_camera(&mut doc, 10.0, 10.0);
    assert_ne!(a, b);
    assert!(a.starts_with("camera-"));
    assert!(b.starts_with("camera-"));
}

#[test]
fn instance_ids_stay_unique_across_clear() {
    let mut doc = SceneDoc::new();
    let before = place_camera(&mut doc, 0.0, 0.0);
    doc.clear();
    let after = place_camera(&mut doc, 0.0, 0.0);
    assert_ne!(before, after);
}

// =============================================================
// restore
// =============================================================

#[test]
fn restore_keeps_geometry_under_new_id() {
    let mut doc = SceneDoc::new();
    let id = place_camera(&mut doc, 30.0, 40.0);
    doc.apply_patch(
        &id,
        &FixturePatch {
            width: Some(90.0),
            rotation_degrees: Some(45.0),
            color: Some("#ff0000".into()),
            label: Some("A cam".into()),
            ..Default::default()
        },
    );
    doc.select_only(Some(&id));
    let record = doc.get(&id).unwrap().clone();

    let copy = doc.restore(&record).clone();
    assert_ne!(copy.instance_id, record.instance_id);
    assert_eq!(copy.bounds(), record.bounds());
    assert_eq!(copy.rotation_degrees, 45.0);
    assert_eq!(copy.color, "#ff0000");
    assert_eq!(copy.label, "A cam");
    assert!(!copy.selected);
}

#[test]
fn restore_enforces_invariants_on_foreign_records() {
    let mut doc = SceneDoc::new();
    let record = PlacedFixture {
        instance_id: "x".into(),
        archetype_kind: "mystery".into(),
        x: 0.0,
        y: 0.0,
        width: 2.0,
        height: f64::NAN,
        color: "#123456".into(),
        label: String::new(),
        rotation_degrees: -90.0,
        selected: true,
    };
    let copy = doc.restore(&record).clone();
    assert_eq!(copy.width, MIN_SIZE);
    assert_eq!(copy.height, MIN_SIZE);
    assert_eq!(copy.rotation_degrees, 270.0);
    assert!(!copy.selected);
}

#[test]
fn restore_canonicalizes_color() {
    let mut doc = SceneDoc::new();
    let mut record = doc.place(catalog::get("table").unwrap(), 0.0, 0.0).clone();
    record.color = "#ABCDEF".into();
    assert_eq!(doc.restore(&record).color, "#abcdef");
}

#[test]
fn restore_replaces_unparseable_color() {
    let mut doc = SceneDoc::new();
    let mut record = doc.place(catalog::get("table").unwrap(), 0.0, 0.0).clone();
    record.color = "<script>".into();
    assert_eq!(doc.restore(&record).color, catalog::get("table").unwrap().default_color);

    record.archetype_kind = "mystery".into();
    record.color = String::new();
    assert_eq!(doc.restore(&record).color, FALLBACK_FIXTURE_COLOR);
}

// =============================================================
// apply_patch
// =============================================================

#[test]
fn patch_applies_only_present_fields() {
    let mut doc = SceneDoc::new();
    let id = place_camera(&mut doc, 1.0, 2.0);
    assert!(doc.apply_patch(&id, &FixturePatch { x: Some(50.0), ..Default::default() }));
    let f = doc.get(&id).unwrap();
    assert_eq!(f.x, 50.0);
    assert_eq!(f.y, 2.0);
    assert_eq!(f.width, 60.0);
}

#[test]
fn patch_clamps_extents() {
    let mut doc = SceneDoc::new();
    let id = place_camera(&mut doc, 0.0, 0.0);
    doc.apply_patch(&id, &FixturePatch { width: Some(-100.0), height: Some(3.0), ..Default::default() });
    let f = doc.get(&id).unwrap();
    assert_eq!(f.width, MIN_SIZE);
    assert_eq!(f.height, MIN_SIZE);
}

#[test]
fn patch_wraps_rotation() {
    let mut doc = SceneDoc::new();
    let id = place_camera(&mut doc, 0.0, 0.0);
    doc.apply_patch(&id, &FixturePatch { rotation_degrees: Some(-30.0), ..Default::default() });
    assert_eq!(doc.get(&id).unwrap().rotation_degrees, 330.0);
}

#[test]
fn patch_canonicalizes_color() {
    let mut doc = SceneDoc::new();
    let id = place_camera(&mut doc, 0.0, 0.0);
    assert!(doc.apply_patch(&id, &FixturePatch { color: Some("#ABC".into()), ..Default::default() }));
    assert_eq!(doc.get(&id).unwrap().color, "#aabbcc");
}

#[test]
fn patch_with_bad_color_changes_nothing() {
    let mut doc = SceneDoc::new();
    let id = place_camera(&mut doc, 0.0, 0.0);
    let patch = FixturePatch { x: Some(99.0), color: Some("teal".into()), ..Default::default() };
    assert!(!doc.apply_patch(&id, &patch));
    let f = doc.get(&id).unwrap();
    assert_eq!(f.x, 0.0);
    assert_eq!(f.color, "#000000");
}

#[test]
fn patch_stale_id_is_noop() {
    let mut doc = SceneDoc::new();
    let id = place_camera(&mut doc, 0.0, 0.0);
    doc.remove(&id);
    assert!(!doc.apply_patch(&id, &FixturePatch { x: Some(5.0), ..Default::default() }));
    assert!(!doc.move_to(&id, 1.0, 1.0));
    assert!(doc.is_empty());
}

#[test]
fn patch_serializes_sparse_camel_case() {
    let patch = FixturePatch { rotation_degrees: Some(15.0), ..Default::default() };
    let json = serde_json::to_value(&patch).unwrap();
    assert_eq!(json, serde_json::json!({ "rotationDegrees": 15.0 }));
}

// =============================================================
// selection
// =============================================================

#[test]
fn select_only_is_single_selection() {
    let mut doc = SceneDoc::new();
    let a = place_camera(&mut doc, 0.0, 0.0);
    let b = place_camera(&mut doc, 0.0, 0.0);
    doc.select_only(Some(&a));
    doc.select_only(Some(&b));
    assert_eq!(doc.iter().filter(|f| f.selected).count(), 1);
    assert_eq!(doc.selected().unwrap().instance_id, b);
}

#[test]
fn select_only_none_clears() {
    let mut doc = SceneDoc::new();
    let a = place_camera(&mut doc, 0.0, 0.0);
    doc.select_only(Some(&a));
    doc.select_only(None);
    assert!(doc.selected().is_none());
}

#[test]
fn select_only_stale_id_clears() {
    let mut doc = SceneDoc::new();
    let a = place_camera(&mut doc, 0.0, 0.0);
    doc.select_only(Some(&a));
    doc.select_only(Some("gone"));
    assert!(doc.selected().is_none());
}

// =============================================================
// remove / snapshot / clear
// =============================================================

#[test]
fn remove_returns_fixture_once() {
    let mut doc = SceneDoc::new();
    let a = place_camera(&mut doc, 0.0, 0.0);
    assert!(doc.remove(&a).is_some());
    assert!(doc.remove(&a).is_none());
}

#[test]
fn snapshot_is_detached_copy() {
    let mut doc = SceneDoc::new();
    let a = place_camera(&mut doc, 0.0, 0.0);
    let snap = doc.snapshot();
    doc.move_to(&a, 300.0, 300.0);
    assert_eq!(snap[0].x, 0.0);
    assert_eq!(doc.get(&a).unwrap().x, 300.0);
}

#[test]
fn fixture_serializes_camel_case() {
    let mut doc = SceneDoc::new();
    let f = doc.place(camera(), 1.0, 2.0).clone();
    let json = serde_json::to_value(&f).unwrap();
    assert_eq!(json["archetypeKind"], "camera");
    assert_eq!(json["rotationDegrees"], 0.0);
    let back: PlacedFixture = serde_json::from_value(json).unwrap();
    assert_eq!(back, f);
}
