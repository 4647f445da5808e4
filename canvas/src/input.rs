//! Input model: tools, mouse buttons, keys, and the gesture state machine.
//!
//! `Tool` and `UiState` capture what the user has chosen in the toolbar.
//! `InputState` is the gesture captured between pointer-down and pointer-up.
//! It is a single enum, so dragging, resizing, rotating and sketching are
//! mutually exclusive by construction.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_PEN_COLOR;
use crate::doc::InstanceId;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select, move, resize and rotate fixtures (default).
    #[default]
    Select,
    /// Freehand sketch in the pen color.
    Pen,
    /// Erase earlier sketch strokes.
    Eraser,
}

impl Tool {
    /// Whether this tool records freehand strokes instead of fixture gestures.
    #[must_use]
    pub fn is_sketch(self) -> bool {
        matches!(self, Self::Pen | Self::Eraser)
    }
}

/// Mouse button identifier. Only the primary button drives gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the host (e.g. `"Delete"`, `"r"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// `Delete` or `Backspace`.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    /// `r` or `R`.
    #[must_use]
    pub fn is_rotate_nudge(&self) -> bool {
        matches!(self.0.as_str(), "r" | "R")
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// How pointer positions are matched against fixture bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitMode {
    /// Test against the unrotated footprint (default).
    #[default]
    BoundingBox,
    /// Map the pointer into the fixture's rotated frame before testing.
    Rotated,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Canonical color token for new pen strokes.
    pub pen_color: String,
    pub hit_mode: HitMode,
}

impl Default for UiState {
    fn default() -> Self {
        Self { tool: Tool::Select, pen_color: DEFAULT_PEN_COLOR.to_owned(), hit_mode: HitMode::BoundingBox }
    }
}

/// The gesture currently holding pointer capture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Moving the selected fixture.
    Dragging {
        id: InstanceId,
        /// Pointer minus fixture x at capture time.
        offset_x: f64,
        /// Pointer minus fixture y at capture time.
        offset_y: f64,
    },
    /// Resizing the selected fixture from its bottom-right handle.
    Resizing {
        id: InstanceId,
        /// Pointer minus bottom-right corner x at capture time.
        offset_x: f64,
        /// Pointer minus bottom-right corner y at capture time.
        offset_y: f64,
    },
    /// Rotating the selected fixture around its center.
    Rotating { id: InstanceId },
    /// Recording a freehand stroke into the sketch layer.
    Sketching,
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Fixture held by the current capture, if any.
    #[must_use]
    pub fn captured_id(&self) -> Option<&str> {
        match self {
            Self::Dragging { id, .. } | Self::Resizing { id, .. } | Self::Rotating { id } => Some(id),
            Self::Idle | Self::Sketching => None,
        }
    }
}
