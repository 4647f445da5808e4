//! Scene scripts: the drag-and-drop payload boundary.
//!
//! A script is a JSON array of steps tagged by `"op"`. Decoding resolves
//! fixture ids against the catalog up front, so the engine only ever sees
//! well-formed archetypes. Pointer coordinates are in display space and are
//! scaled to canvas pixels once a `display` step has set the display size.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::path::{Path, PathBuf};

use canvas::catalog::{self, FixtureArchetype};
use canvas::engine::{Action, Engine};
use canvas::geom::Point;
use canvas::input::{Button, Key, Tool};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::HostError;
use crate::export;

/// One step as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum RawStep {
    Add { fixture: String, x: f64, y: f64 },
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
    },
    Move { x: f64, y: f64 },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
    },
    Key { key: String },
    Tool { tool: Tool },
    PenColor { color: String },
    Recolor { color: String },
    Relabel { label: String },
    Display { width: f64, height: f64 },
    Import { path: PathBuf },
    Clear,
    ClearSketch,
    ClearImage,
}

/// A decoded step with its archetype resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Add { archetype: &'static FixtureArchetype, x: f64, y: f64 },
    Down(Point, Button),
    Move(Point),
    Up(Point, Button),
    Key(Key),
    Tool(Tool),
    PenColor(String),
    Recolor(String),
    Relabel(String),
    Display { width: f64, height: f64 },
    Import(PathBuf),
    Clear,
    ClearSketch,
    ClearImage,
}

/// Decode a script, rejecting unknown fixture ids.
///
/// # Errors
///
/// Returns [`HostError::InvalidJson`] for malformed input and
/// [`HostError::UnknownFixture`] for ids missing from the catalog.
pub fn parse(text: &str) -> Result<Vec<Step>, HostError> {
    let raw: Vec<RawStep> = serde_json::from_str(text)?;
    raw.into_iter().enumerate().map(|(step, raw)| resolve(step, raw)).collect()
}

fn resolve(step: usize, raw: RawStep) -> Result<Step, HostError> {
    Ok(match raw {
        RawStep::Add { fixture, x, y } => match catalog::get(&fixture) {
            Some(archetype) => Step::Add { archetype, x, y },
            None => return Err(HostError::UnknownFixture { step, id: fixture }),
        },
        RawStep::Down { x, y, button } => Step::Down(Point::new(x, y), button),
        RawStep::Move { x, y } => Step::Move(Point::new(x, y)),
        RawStep::Up { x, y, button } => Step::Up(Point::new(x, y), button),
        RawStep::Key { key } => Step::Key(Key(key)),
        RawStep::Tool { tool } => Step::Tool(tool),
        RawStep::PenColor { color } => Step::PenColor(color),
        RawStep::Recolor { color } => Step::Recolor(color),
        RawStep::Relabel { label } => Step::Relabel(label),
        RawStep::Display { width, height } => Step::Display { width, height },
        RawStep::Import { path } => Step::Import(path),
        RawStep::Clear => Step::Clear,
        RawStep::ClearSketch => Step::ClearSketch,
        RawStep::ClearImage => Step::ClearImage,
    })
}

/// Read and decode a script file. Relative image paths are resolved against
/// the script's own directory.
///
/// # Errors
///
/// Returns [`HostError::Read`] if the file cannot be read, plus everything
/// [`parse`] reports.
pub fn load(path: &Path) -> Result<Vec<Step>, HostError> {
    let mut steps = parse(&export::read_text(path)?)?;
    for step in &mut steps {
        if let Step::Import(image) = step {
            *image = export::relative_to(path, image);
        }
    }
    Ok(steps)
}

/// Feed every step to the engine. Returns the number of scene mutations
/// reported back.
///
/// # Errors
///
/// Returns [`HostError::Read`] or [`HostError::Render`] if an imported image
/// cannot be read or decoded. Steps before the failing one stay applied.
pub fn play(engine: &mut Engine, steps: &[Step]) -> Result<usize, HostError> {
    let mut mutations = 0;
    for step in steps {
        let actions = match step {
            Step::Add { archetype, x, y } => engine.add_fixture(archetype, *x, *y),
            Step::Down(pt, button) => engine.on_pointer_down(engine.to_canvas(*pt), *button),
            Step::Move(pt) => engine.on_pointer_move(engine.to_canvas(*pt)),
            Step::Up(pt, button) => engine.on_pointer_up(engine.to_canvas(*pt), *button),
            Step::Key(key) => engine.on_key_down(key.clone()),
            Step::Tool(tool) => {
                engine.set_tool(*tool);
                Vec::new()
            }
            Step::PenColor(color) => {
                if !engine.set_pen_color(color) {
                    warn!(%color, "ignoring invalid pen color");
                }
                Vec::new()
            }
            Step::Recolor(color) => engine.recolor_selected(color),
            Step::Relabel(label) => engine.relabel_selected(label),
            Step::Display { width, height } => {
                engine.set_display_size(*width, *height);
                Vec::new()
            }
            Step::Import(path) => engine.import_image(&export::read_bytes(path)?)?,
            Step::Clear => engine.clear_all(),
            Step::ClearSketch => engine.clear_sketch(),
            Step::ClearImage => engine.clear_image(),
        };
        mutations += actions.iter().filter(|a| is_mutation(a)).count();
    }
    debug!(steps = steps.len(), mutations, "script played");
    Ok(mutations)
}

fn is_mutation(action: &Action) -> bool {
    matches!(
        action,
        Action::FixtureAdded(_) | Action::FixtureUpdated { .. } | Action::FixtureDeleted { .. } | Action::SceneCleared
    )
}
