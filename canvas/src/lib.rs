//! Storyboard scene canvas: fixture catalog, placement controller and renderer.
//!
//! The crate owns the full lifecycle of a storyboard frame: looking up fixture
//! archetypes, translating pointer and keyboard input into scene mutations,
//! hit-testing placed fixtures, and rendering the scene onto a software raster
//! surface. The host is responsible only for decoding drag-and-drop payloads,
//! feeding canvas-space input to the engine and exporting the resulting
//! bitmap or instance list.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`catalog`] | Static fixture archetype library and filtering |
//! | [`doc`] | Placed fixtures and the ordered scene list |
//! | [`input`] | Tools, keys and the gesture state machine |
//! | [`hit`] | Hit-testing against fixture bodies and handles |
//! | [`sketch`] | Freehand pen and eraser strokes |
//! | [`glyph`] | Kind-to-glyph registry and built-in fixture icons |
//! | [`render`] | Raster surface and scene painting |
//! | [`label`] | Label text rasterization with a system font |
//! | [`geom`] | Points, boxes, rotation math and display scaling |
//! | [`color`] | Color tokens and the pen palette |
//! | [`consts`] | Shared numeric constants (minimum sizes, handle geometry, etc.) |

pub mod catalog;
pub mod color;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod glyph;
pub mod hit;
pub mod input;
pub mod label;
pub mod render;
pub mod sketch;
