#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_distance() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0)), 5.0));
}

#[test]
fn point_rotated_quarter_turn_is_clockwise_on_screen() {
    let p = Point::new(10.0, 0.0).rotated_around(Point::new(0.0, 0.0), 90.0);
    assert!(point_approx_eq(p, Point::new(0.0, 10.0)));
}

#[test]
fn point_rotated_full_turn_returns_home() {
    let pivot = Point::new(5.0, 5.0);
    let p = Point::new(12.0, -3.0);
    assert!(point_approx_eq(p.rotated_around(pivot, 360.0), p));
}

// --- Rect ---

#[test]
fn rect_contains_is_inclusive() {
    let r = Rect::new(100.0, 100.0, 60.0, 40.0);
    assert!(r.contains(Point::new(100.0, 100.0)));
    assert!(r.contains(Point::new(160.0, 140.0)));
    assert!(r.contains(Point::new(110.0, 110.0)));
    assert!(!r.contains(Point::new(160.1, 120.0)));
    assert!(!r.contains(Point::new(99.9, 120.0)));
}

#[test]
fn rect_center_and_corner() {
    let r = Rect::new(10.0, 20.0, 40.0, 60.0);
    assert_eq!(r.center(), Point::new(30.0, 50.0));
    assert_eq!(r.bottom_right(), Point::new(50.0, 80.0));
}

#[test]
fn centered_square_is_centered() {
    let r = Rect::centered_square(Point::new(50.0, 50.0), 8.0);
    assert_eq!(r, Rect::new(46.0, 46.0, 8.0, 8.0));
    assert_eq!(r.center(), Point::new(50.0, 50.0));
}

// --- normalize_degrees ---

#[test]
fn normalize_wraps_positive_overflow() {
    assert!(approx_eq(normalize_degrees(370.0), 10.0));
    assert!(approx_eq(normalize_degrees(720.0), 0.0));
}

#[test]
fn normalize_wraps_negative() {
    assert!(approx_eq(normalize_degrees(-15.0), 345.0));
    assert!(approx_eq(normalize_degrees(-360.0), 0.0));
}

#[test]
fn normalize_never_returns_360() {
    let v = normalize_degrees(-1e-20);
    assert!((0.0..360.0).contains(&v));
}

#[test]
fn normalize_non_finite_is_zero() {
    assert_eq!(normalize_degrees(f64::NAN), 0.0);
    assert_eq!(normalize_degrees(f64::INFINITY), 0.0);
}

// --- Viewport ---

#[test]
fn viewport_identity_when_sizes_match() {
    let vp = Viewport::new(800.0, 600.0);
    let p = Point::new(123.0, 45.0);
    assert!(point_approx_eq(vp.to_canvas(p), p));
}

#[test]
fn viewport_scales_half_size_display() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_display_size(400.0, 300.0);
    assert!(point_approx_eq(vp.to_canvas(Point::new(100.0, 150.0)), Point::new(200.0, 300.0)));
}

#[test]
fn viewport_zero_display_falls_back_to_identity() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_display_size(0.0, 0.0);
    assert!(point_approx_eq(vp.to_canvas(Point::new(7.0, 9.0)), Point::new(7.0, 9.0)));
}
