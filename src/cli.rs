use std::path::PathBuf;

use canvas::catalog::ALL_CATEGORIES;
use canvas::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use canvas::input::HitMode;
use clap::{Parser, Subcommand, ValueEnum};

use crate::board::STARTING_PANELS;

#[cfg(test)]
#[path = "cli_test.rs"]
mod cli_test;

#[derive(Parser, Debug)]
#[command(name = "storyboard", about = "Storyboard scene canvas: fixture catalog and frame renderer")]
pub struct Cli {
    /// Canvas backing width in pixels.
    #[arg(long, env = "STORYBOARD_WIDTH", default_value_t = CANVAS_WIDTH)]
    pub width: u32,

    /// Canvas backing height in pixels.
    #[arg(long, env = "STORYBOARD_HEIGHT", default_value_t = CANVAS_HEIGHT)]
    pub height: u32,

    /// How pointer positions are matched against rotated fixtures.
    #[arg(long, env = "STORYBOARD_HIT_MODE", value_enum, default_value_t = HitModeArg::Box)]
    pub hit_mode: HitModeArg,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List fixture archetypes, optionally filtered.
    Catalog {
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,
        #[arg(long)]
        search: Option<String>,
    },
    /// Play a scene script and write the rendered frame.
    Render {
        script: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Also write the placed-fixture list as JSON.
        #[arg(long)]
        export_json: Option<PathBuf>,
    },
    /// Rebuild a scene from an exported fixture list and render it.
    Restore {
        json: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Play a storyboard manifest and write one PNG per panel.
    Board {
        manifest: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        /// Panels the storyboard starts with.
        #[arg(long, default_value_t = STARTING_PANELS)]
        panels: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HitModeArg {
    /// Unrotated bounding box.
    Box,
    /// Pointer mapped into the fixture's rotated frame.
    Rotated,
}

impl From<HitModeArg> for HitMode {
    fn from(arg: HitModeArg) -> Self {
        match arg {
            HitModeArg::Box => Self::BoundingBox,
            HitModeArg::Rotated => Self::Rotated,
        }
    }
}
