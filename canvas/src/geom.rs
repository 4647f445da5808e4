//! Canvas-space geometry: points, axis-aligned boxes, angles, and the
//! display-to-canvas scaling the host applies to raw pointer positions.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotate this point around `pivot` by `degrees` (clockwise in a y-down frame).
    #[must_use]
    pub fn rotated_around(self, pivot: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point {
            x: pivot.x + dx * cos - dy * sin,
            y: pivot.y + dx * sin + dy * cos,
        }
    }
}

/// Axis-aligned box with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Square of side `size` centered on `center`.
    #[must_use]
    pub fn centered_square(center: Point, size: f64) -> Self {
        let half = size / 2.0;
        Self { x: center.x - half, y: center.y - half, width: size, height: size }
    }

    /// Inclusive containment test on all four edges.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }
}

/// Wrap an angle in degrees into `[0, 360)`. Non-finite input maps to `0`.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Maps pointer positions from the displayed size of the surface to its
/// backing resolution.
///
/// The canvas backing store may be larger or smaller than the element that
/// shows it; hosts hand the controller canvas-space coordinates only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub display_width: f64,
    pub display_height: f64,
}

impl Viewport {
    /// Viewport whose display size equals its backing size.
    #[must_use]
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self { canvas_width, canvas_height, display_width: canvas_width, display_height: canvas_height }
    }

    /// Update the displayed size of the surface.
    pub fn set_display_size(&mut self, width: f64, height: f64) {
        self.display_width = width;
        self.display_height = height;
    }

    /// Convert a display-space point (relative to the element's top-left) to canvas pixels.
    #[must_use]
    pub fn to_canvas(&self, display: Point) -> Point {
        Point {
            x: display.x * scale(self.canvas_width, self.display_width),
            y: display.y * scale(self.canvas_height, self.display_height),
        }
    }
}

fn scale(canvas: f64, display: f64) -> f64 {
    if display > 0.0 && display.is_finite() { canvas / display } else { 1.0 }
}
