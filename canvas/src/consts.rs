//! Shared numeric constants for the canvas crate.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width or height a placed fixture may be resized to, in canvas pixels.
pub const MIN_SIZE: f64 = 20.0;

// ── Handles ─────────────────────────────────────────────────────

/// Side length of the square resize handle centered on the bottom-right corner.
pub const HANDLE_SIZE: f64 = 8.0;

/// Distance from the top edge of a fixture to its rotate handle.
pub const ROTATE_HANDLE_DISTANCE: f64 = 15.0;

/// Pointer radius within which the rotate handle is armable.
pub const ROTATE_HANDLE_RADIUS: f64 = 8.0;

/// Degrees added by one press of the rotate-nudge key.
pub const ROTATE_NUDGE_DEG: f64 = 15.0;

// ── Surface ─────────────────────────────────────────────────────

/// Default backing width of the raster surface.
pub const CANVAS_WIDTH: u32 = 800;

/// Default backing height of the raster surface.
pub const CANVAS_HEIGHT: u32 = 600;

/// Background fill painted before anything else.
pub const BACKGROUND_COLOR: &str = "#ffffff";

/// Fixture color for restored records whose color does not parse and whose
/// kind is not in the catalog.
pub const FALLBACK_FIXTURE_COLOR: &str = "#000000";

// ── Sketch ──────────────────────────────────────────────────────

/// Pen stroke width in canvas pixels.
pub const PEN_WIDTH: f64 = 2.0;

/// Eraser stroke width in canvas pixels.
pub const ERASER_WIDTH: f64 = 20.0;

/// Pen color used until the host picks another.
pub const DEFAULT_PEN_COLOR: &str = "#000000";
