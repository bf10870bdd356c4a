//! Configuration types for rec-em.
//!
//! Two layers exist. [`EmbedConfig`] is the optional YAML file layer, where
//! every field may be absent. [`ResolvedConfig`] is what the header pipeline
//! consumes: inputs already expanded to a flat file list, every option
//! settled. It is built once and only read afterwards.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::codegen::encoder::EncoderOptions;
use crate::core::errors::{RecEmError, Result, ResultExt};

/// Base name of the generated header when none is configured.
pub const DEFAULT_OUTPUT_NAME: &str = "rec_em";

/// Extension appended to the output base name.
pub const HEADER_EXTENSION: &str = "hpp";

/// Config files picked up from the working directory when `--config` is absent.
pub const IMPLICIT_CONFIG_FILES: [&str; 2] = [".rec_em.yml", ".rec_em.yaml"];

/// Settled configuration for one header generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Input files in emission order
    pub input_files: Vec<PathBuf>,
    /// Directory the header is written to; `None` means the working directory
    pub output_directory: Option<PathBuf>,
    /// Header base name, without the `.hpp` extension
    pub output_name: String,
    /// Namespace wrapping the declarations, if any
    pub namespace: Option<String>,
    /// Array body formatting
    pub encoder: EncoderOptions,
}

impl ResolvedConfig {
    /// Configuration for `input_files` with every option at its default
    pub fn new(input_files: Vec<PathBuf>) -> Self {
        Self {
            input_files,
            output_directory: None,
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            namespace: None,
            encoder: EncoderOptions::default(),
        }
    }

    /// Wrap declarations in `namespace`
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Write the header into `directory`
    pub fn with_output_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.output_directory = Some(directory.into());
        self
    }

    /// Use `name` as the header base name
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    /// Full path of the generated header.
    pub fn header_path(&self) -> PathBuf {
        let file_name = format!("{}.{HEADER_EXTENSION}", self.output_name);
        match &self.output_directory {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
            _ => PathBuf::from(file_name),
        }
    }

    /// Namespace to open, skipping an empty name
    pub fn active_namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|name| !name.is_empty())
    }
}

/// Optional YAML configuration file.
///
/// ```yaml
/// output_name: embedded_assets
/// output_directory: generated/include
/// namespace: assets
/// sort_inputs: true
/// tokens_per_line: 16
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedConfig {
    /// Header base name
    pub output_name: Option<String>,
    /// Output directory, created if missing
    pub output_directory: Option<PathBuf>,
    /// Namespace wrapping the declarations
    pub namespace: Option<String>,
    /// Sort expanded inputs by path instead of keeping walk order
    pub sort_inputs: bool,
    /// Hex tokens per array line
    pub tokens_per_line: Option<usize>,
}

impl EmbedConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document for a struct
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_yaml_str(&content).with_context(|| path.display().to_string())
    }

    /// Look for one of [`IMPLICIT_CONFIG_FILES`] in `dir`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        IMPLICIT_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.tokens_per_line == Some(0) {
            return Err(RecEmError::config_field(
                "tokens_per_line must be greater than zero",
                "tokens_per_line",
            ));
        }

        if let Some(name) = &self.output_name {
            validate_output_name(name)?;
        }

        Ok(())
    }

    /// Combine this layer with the resolved input list.
    pub fn into_resolved(self, input_files: Vec<PathBuf>) -> Result<ResolvedConfig> {
        self.validate()?;

        let mut encoder = EncoderOptions::default();
        if let Some(per_line) = self.tokens_per_line {
            encoder = encoder.with_tokens_per_line(per_line);
        }

        Ok(ResolvedConfig {
            input_files,
            output_directory: self.output_directory,
            output_name: self
                .output_name
                .unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string()),
            namespace: self.namespace,
            encoder,
        })
    }
}

/// Header base names are plain file names, not paths.
fn validate_output_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(RecEmError::config_field(
            "output name must not be empty",
            "output_name",
        ));
    }
    if name.contains(['/', '\\']) {
        return Err(RecEmError::config_field(
            format!("output name '{name}' must not contain a path separator; use the output directory instead"),
            "output_name",
        ));
    }
    Ok(())
}
