mod board;
mod cli;
mod error;
mod export;
mod script;

use std::path::Path;
use std::process::ExitCode;

use canvas::catalog::{ALL_CATEGORIES, FixtureArchetype, SearchState};
use canvas::engine::Engine;
use clap::Parser;

use crate::board::Storyboard;
use crate::cli::{Cli, Command};
use crate::error::HostError;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "storyboard failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), HostError> {
    match cli.command {
        Command::Catalog { ref category, ref search } => {
            run_catalog(category, search.as_deref());
            Ok(())
        }
        Command::Render { ref script, ref out, ref export_json } => {
            let mut engine = new_engine(&cli)?;
            run_render(&mut engine, script, out, export_json.as_deref())
        }
        Command::Restore { ref json, ref out } => {
            let mut engine = new_engine(&cli)?;
            run_restore(&mut engine, json, out)
        }
        Command::Board { ref manifest, ref out_dir, panels } => {
            let mut board = Storyboard::new(cli.width, cli.height, cli.hit_mode.into(), panels)?;
            run_board(&mut board, manifest, out_dir)
        }
    }
}

fn new_engine(cli: &Cli) -> Result<Engine, HostError> {
    let mut engine = Engine::new(cli.width, cli.height)?;
    engine.set_hit_mode(cli.hit_mode.into());
    Ok(engine)
}

fn run_catalog(category: &str, search: Option<&str>) {
    let state = match search {
        None if category.eq_ignore_ascii_case(ALL_CATEGORIES) => SearchState::NotSearched,
        _ => SearchState::run(category, search.unwrap_or_default()),
    };
    if state.is_empty_result() {
        println!("No fixtures found matching your search");
        return;
    }
    for archetype in state.visible() {
        println!("{}", catalog_line(archetype));
    }
}

fn catalog_line(a: &FixtureArchetype) -> String {
    format!(
        "{:<12} {:<16} {:<10} {:>3}x{:<3} {}  {}",
        a.id,
        a.name,
        a.category.as_str(),
        a.default_width,
        a.default_height,
        a.default_color,
        a.description
    )
}

fn run_render(engine: &mut Engine, script: &Path, out: &Path, export_json: Option<&Path>) -> Result<(), HostError> {
    let steps = script::load(script)?;
    let mutations = script::play(engine, &steps)?;
    export::write_png(engine, out)?;
    tracing::info!(steps = steps.len(), mutations, out = %out.display(), "frame rendered");

    if let Some(path) = export_json {
        let fixtures = engine.export_instance_list();
        export::write_instance_list(&fixtures, path)?;
        tracing::info!(fixtures = fixtures.len(), path = %path.display(), "instance list exported");
    }
    Ok(())
}

fn run_restore(engine: &mut Engine, json: &Path, out: &Path) -> Result<(), HostError> {
    let records = export::read_instance_list(json)?;
    for record in &records {
        engine.restore_fixture(record);
    }
    export::write_png(engine, out)?;
    tracing::info!(fixtures = records.len(), out = %out.display(), "scene restored");
    Ok(())
}

fn run_board(board: &mut Storyboard, manifest: &Path, out_dir: &Path) -> Result<(), HostError> {
    let steps = board::load(manifest)?;
    let mutations = board::play(board, &steps)?;
    let written = board::write_panels(board, out_dir)?;
    tracing::info!(steps = steps.len(), mutations, panels = written.len(), "storyboard rendered");
    Ok(())
}
