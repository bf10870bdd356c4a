//! Command Execution Logic
//!
//! Turns parsed arguments into a [`ResolvedConfig`] and runs the header
//! pipeline. Everything touching the filesystem before generation (config
//! discovery, directory walks, output directory creation) happens here.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::cli::args::Cli;
use crate::cli::config_layer::build_layered_config;
use rec_em::core::config::ResolvedConfig;
use rec_em::core::discovery::{resolve_inputs, InputOrder};
use rec_em::{write_unit, UnitSummary};

/// Resolve configuration for `cli` relative to `working_dir`.
pub fn resolve_config(cli: &Cli, working_dir: &Path) -> anyhow::Result<ResolvedConfig> {
    let layered = build_layered_config(cli, working_dir)?;

    let order = InputOrder::from_sort_flag(layered.sort_inputs);
    let input_files = resolve_inputs(&cli.inputs, order)?;
    debug!("Resolved {} input file(s) ({:?} order)", input_files.len(), order);

    if let Some(dir) = &layered.output_directory {
        prepare_output_directory(dir)?;
    }

    Ok(layered.into_resolved(input_files)?)
}

/// Create `dir` and any missing parents.
fn prepare_output_directory(dir: &Path) -> anyhow::Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }

    debug!("Creating output directory {}", dir.display());
    fs::create_dir_all(dir)
        .with_context(|| format!("Error creating directories: {}", dir.display()))
}

/// Main embed command: resolve inputs and write the header.
pub fn embed_command(cli: &Cli) -> anyhow::Result<UnitSummary> {
    let working_dir = std::env::current_dir().context("Failed to read working directory")?;
    let config = resolve_config(cli, &working_dir)?;
    Ok(write_unit(&config)?)
}
