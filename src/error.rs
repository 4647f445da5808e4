use std::path::PathBuf;

use canvas::render::RenderError;

/// Failures at the host boundary: files, payload coding, panels and rendering.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("cannot encode JSON: {0}")]
    Encode(serde_json::Error),
    #[error("step {step}: unknown fixture `{id}`")]
    UnknownFixture { step: usize, id: String },
    #[error("no panel with id {id}")]
    UnknownPanel { id: u32 },
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}
