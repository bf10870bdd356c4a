//! Configuration Layer Management
//!
//! Builds the effective [`EmbedConfig`] from defaults, an optional YAML file
//! and the command line, later layers taking priority.

use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::cli::args::Cli;
use rec_em::core::config::EmbedConfig;

/// Trait for merging configuration layers
pub trait ConfigMerge<T> {
    /// Merge another configuration into this one, with the other taking priority
    fn merge_with(&mut self, other: T);
}

impl ConfigMerge<EmbedConfig> for EmbedConfig {
    fn merge_with(&mut self, other: EmbedConfig) {
        if other.output_name.is_some() {
            self.output_name = other.output_name;
        }
        if other.output_directory.is_some() {
            self.output_directory = other.output_directory;
        }
        if other.namespace.is_some() {
            self.namespace = other.namespace;
        }
        if other.tokens_per_line.is_some() {
            self.tokens_per_line = other.tokens_per_line;
        }
        // A flag can only switch sorting on
        self.sort_inputs |= other.sort_inputs;
    }
}

impl From<&Cli> for EmbedConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            output_name: cli.output.clone(),
            output_directory: cli.directory.clone(),
            namespace: cli.namespace.clone(),
            sort_inputs: cli.sort,
            tokens_per_line: cli.tokens_per_line,
        }
    }
}

/// Layered configuration: defaults, then the config file, then CLI flags.
///
/// The file is `--config` when given, otherwise the first of
/// `.rec_em.yml`/`.rec_em.yaml` found in `working_dir`.
pub fn build_layered_config(cli: &Cli, working_dir: &Path) -> anyhow::Result<EmbedConfig> {
    let mut config = EmbedConfig::default();

    let config_path = cli
        .config
        .clone()
        .or_else(|| EmbedConfig::discover(working_dir));

    if let Some(path) = config_path {
        debug!("Loading configuration from {}", path.display());
        let file_config = EmbedConfig::from_yaml_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        config.merge_with(file_config);
    }

    config.merge_with(EmbedConfig::from(cli));
    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}
