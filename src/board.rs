//! Multi-panel storyboards.
//!
//! A storyboard is an ordered set of numbered panels, each with its own
//! engine. A board manifest is a JSON array of steps tagged by `"op"` that
//! adds panels, plays scene scripts into them and clears them. Every panel is
//! written out as `panel-<id>.png`.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use std::fs;
use std::path::{Path, PathBuf};

use canvas::engine::Engine;
use canvas::input::HitMode;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::HostError;
use crate::export;
use crate::script;

/// Panels a new storyboard starts with.
pub const STARTING_PANELS: u32 = 4;

/// One numbered panel.
#[derive(Debug)]
pub struct Panel {
    pub id: u32,
    pub engine: Engine,
}

/// Ordered panels sharing one canvas size and hit mode.
#[derive(Debug)]
pub struct Storyboard {
    panels: Vec<Panel>,
    width: u32,
    height: u32,
    hit_mode: HitMode,
}

impl Storyboard {
    /// Create a storyboard with panels numbered `1..=count`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Render`] if a panel surface cannot be allocated.
    pub fn new(width: u32, height: u32, hit_mode: HitMode, count: u32) -> Result<Self, HostError> {
        let mut board = Self { panels: Vec::new(), width, height, hit_mode };
        for _ in 0..count {
            board.add_panel()?;
        }
        Ok(board)
    }

    /// Append a blank panel numbered one past the highest existing id.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Render`] if the surface cannot be allocated.
    pub fn add_panel(&mut self) -> Result<u32, HostError> {
        let id = self.panels.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let mut engine = Engine::new(self.width, self.height)?;
        engine.set_hit_mode(self.hit_mode);
        self.panels.push(Panel { id, engine });
        debug!(id, "panel added");
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`HostError::UnknownPanel`] if no panel has `id`.
    pub fn panel_mut(&mut self, id: u32) -> Result<&mut Engine, HostError> {
        self.panels
            .iter_mut()
            .find(|p| p.id == id)
            .map(|p| &mut p.engine)
            .ok_or(HostError::UnknownPanel { id })
    }

    /// Wipe one panel, or every panel when `id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownPanel`] if `id` names no panel.
    pub fn clear(&mut self, id: Option<u32>) -> Result<(), HostError> {
        match id {
            Some(id) => {
                self.panel_mut(id)?.clear_canvas();
            }
            None => {
                for panel in &mut self.panels {
                    panel.engine.clear_canvas();
                }
            }
        }
        debug!(?id, "panels cleared");
        Ok(())
    }

    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }
}

/// One manifest step as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BoardStep {
    /// Play a scene script into a panel.
    Panel { id: u32, script: PathBuf },
    AddPanel,
    /// Clear one panel, or all of them without an id.
    Clear {
        #[serde(default)]
        id: Option<u32>,
    },
}

/// Decode a manifest.
///
/// # Errors
///
/// Returns [`HostError::InvalidJson`] for malformed input.
pub fn parse(text: &str) -> Result<Vec<BoardStep>, HostError> {
    Ok(serde_json::from_str(text)?)
}

/// Read and decode a manifest file. Relative script paths are resolved
/// against the manifest's own directory.
///
/// # Errors
///
/// Returns [`HostError::Read`] or [`HostError::InvalidJson`].
pub fn load(path: &Path) -> Result<Vec<BoardStep>, HostError> {
    let mut steps = parse(&export::read_text(path)?)?;
    for step in &mut steps {
        if let BoardStep::Panel { script, .. } = step {
            *script = export::relative_to(path, script);
        }
    }
    Ok(steps)
}

/// Apply every manifest step. Returns the total scene mutations across panels.
///
/// # Errors
///
/// Stops at the first step whose panel is unknown or whose script fails to
/// load or play.
pub fn play(board: &mut Storyboard, steps: &[BoardStep]) -> Result<usize, HostError> {
    let mut mutations = 0;
    for step in steps {
        match step {
            BoardStep::Panel { id, script } => {
                let scene = script::load(script)?;
                mutations += script::play(board.panel_mut(*id)?, &scene)?;
            }
            BoardStep::AddPanel => {
                board.add_panel()?;
            }
            BoardStep::Clear { id } => board.clear(*id)?,
        }
    }
    debug!(steps = steps.len(), mutations, "board played");
    Ok(mutations)
}

/// Write every panel as `panel-<id>.png` under `dir`, creating it if needed.
/// Returns the written paths in panel order.
///
/// # Errors
///
/// Returns [`HostError::Write`] if the directory or a file cannot be written.
pub fn write_panels(board: &Storyboard, dir: &Path) -> Result<Vec<PathBuf>, HostError> {
    fs::create_dir_all(dir).map_err(|source| HostError::Write { path: dir.to_owned(), source })?;
    let mut written = Vec::with_capacity(board.panels.len());
    for panel in &board.panels {
        let path = dir.join(format!("panel-{}.png", panel.id));
        export::write_png(&panel.engine, &path)?;
        written.push(path);
    }
    info!(panels = written.len(), dir = %dir.display(), "panels written");
    Ok(written)
}
