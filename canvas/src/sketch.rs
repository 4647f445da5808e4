//! Freehand sketch layer: pen and eraser strokes drawn beneath the fixtures.

#[cfg(test)]
#[path = "sketch_test.rs"]
mod sketch_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ERASER_WIDTH, PEN_WIDTH};
use crate::geom::Point;

/// How a stroke composites onto the sketch layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    /// Paints in the stroke color.
    Pen,
    /// Clears earlier strokes under it.
    Eraser,
}

/// One continuous pointer-down to pointer-up polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchStroke {
    pub kind: StrokeKind,
    /// Canonical color token; ignored by the eraser.
    pub color: String,
    pub width: f64,
    pub points: Vec<Point>,
}

/// Ordered list of strokes; later strokes composite over earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Sketch {
    strokes: Vec<SketchStroke>,
}

impl Sketch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new stroke at `start`.
    pub fn begin(&mut self, kind: StrokeKind, color: &str, start: Point) {
        let width = match kind {
            StrokeKind::Pen => PEN_WIDTH,
            StrokeKind::Eraser => ERASER_WIDTH,
        };
        self.strokes.push(SketchStroke { kind, color: color.to_owned(), width, points: vec![start] });
    }

    /// Extend the most recent stroke. Returns false if there is none.
    pub fn extend(&mut self, pt: Point) -> bool {
        let Some(stroke) = self.strokes.last_mut() else {
            return false;
        };
        if stroke.points.last() != Some(&pt) {
            stroke.points.push(pt);
        }
        true
    }

    #[must_use]
    pub fn strokes(&self) -> &[SketchStroke] {
        &self.strokes
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
