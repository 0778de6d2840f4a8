//! Data management: export, import, reset and demo seed

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use habit_idle::storage::transfer::{
    export_document, export_filename, import_document, parse_document,
};

use super::{confirm, AppContext};

pub fn export_command(ctx: &AppContext, output: Option<PathBuf>) -> Result<()> {
    let store = ctx.store()?;
    let document = export_document(&store)?;
    let path = output
        .unwrap_or_else(|| PathBuf::from(export_filename(chrono::Local::now().date_naive())));

    std::fs::write(&path, document)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    println!("Exported to {}", path.display());
    Ok(())
}

pub fn import_command(ctx: &AppContext, file: &Path, yes: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read import file: {}", file.display()))?;
    // Validate before asking, so a bad file never gets as far as the prompt
    let document = parse_document(&text)?;

    if !yes && !confirm("Import replaces ALL current data. Continue?")? {
        println!("Import cancelled.");
        return Ok(());
    }

    let store = ctx.store()?;
    let written = import_document(&store, &document)?;

    // Load through the engine to report what the imported save contains
    let engine = ctx.engine()?;
    println!(
        "Imported {} keys. {} is level {} with {} habits.",
        written,
        engine.state().player.name,
        engine.state().player.level,
        engine.state().habits.len()
    );
    Ok(())
}

pub fn reset_command(ctx: &AppContext, yes: bool) -> Result<()> {
    if !yes && !confirm("Delete ALL progress, habits and purchases?")? {
        println!("Reset cancelled.");
        return Ok(());
    }
    let mut engine = ctx.engine()?;
    engine.reset();
    println!("All data cleared.");
    Ok(())
}

pub fn seed_command(ctx: &AppContext, yes: bool) -> Result<()> {
    let mut engine = ctx.engine()?;
    if !engine.state().habits.is_empty()
        && !yes
        && !confirm("Replace your current data with demo data?")?
    {
        println!("Seed cancelled.");
        return Ok(());
    }

    engine.seed_demo();
    let state = engine.state();
    if state.habits.is_empty() {
        bail!("Demo data could not be created");
    }
    println!(
        "Seeded {} habits and {} completions. Level {}, {} coins.",
        state.habits.len(),
        state.completions.len(),
        state.player.level,
        state.player.coins
    );
    Ok(())
}
