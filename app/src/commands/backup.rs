//! Backup export and import commands

use crate::cli::ExportFormat;
use crate::error::AppResult;
use crate::state::AppState;
use std::fs;
use std::io::Write;
use std::path::Path;
use swasth_kadam_shared::backup::{export_csv, export_json, import_backup};
use swasth_kadam_shared::{KeyValueStore, TrackedFoodRepository};
use tracing::info;

pub fn export<S: KeyValueStore, W: Write>(
    state: &AppState<S>,
    out: &mut W,
    format: ExportFormat,
    output: Option<&Path>,
) -> AppResult<()> {
    let foods = state.repo().load();
    let document = match format {
        ExportFormat::Json => export_json(&foods)?,
        ExportFormat::Csv => export_csv(&foods)?,
    };

    match output {
        Some(path) => {
            fs::write(path, &document)?;
            info!(path = %path.display(), count = foods.len(), "Exported tracked foods");
            writeln!(out, "Exported {} foods to {}", foods.len(), path.display())?;
        }
        None => writeln!(out, "{}", document.trim_end())?,
    }
    Ok(())
}

pub fn import<S: KeyValueStore, W: Write>(
    state: &mut AppState<S>,
    out: &mut W,
    path: &Path,
) -> AppResult<()> {
    let raw = fs::read_to_string(path)?;
    let count = import_backup(&raw, state.repo_mut())?;
    writeln!(out, "Imported {} foods from {}", count, path.display())?;
    Ok(())
}
