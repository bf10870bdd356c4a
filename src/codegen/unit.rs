//! Assembly of the complete generated header.
//!
//! ```text
//! #pragma once
//!
//!
//! namespace assets {
//!     <declaration block per input file>
//! }
//!
//! ```
//!
//! The namespace lines are only written when a non-empty namespace is
//! configured (hyphens become underscores). Files are emitted strictly one
//! after another in configuration order; the first error stops the run.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::codegen::declaration::{emit_declaration, DeclarationSummary};
use crate::codegen::symbol::normalize_identifier;
use crate::core::config::ResolvedConfig;
use crate::core::errors::{RecEmError, Result};

/// Guard written at the top of every header.
pub const PRAGMA_ONCE: &str = "#pragma once";

/// Outcome of a header generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSummary {
    /// Path the header was written to
    pub header_path: PathBuf,
    /// One entry per embedded file, in emission order
    pub declarations: Vec<DeclarationSummary>,
}

impl UnitSummary {
    /// Total bytes embedded across all files
    pub fn total_bytes(&self) -> u64 {
        self.declarations.iter().map(|d| d.declared_size).sum()
    }
}

/// Write the header for `config` to `sink`.
///
/// `header_path` names the sink in errors and the summary. An empty input
/// list is not an error: a warning is logged and the header still gets its
/// guard and namespace.
pub fn assemble_unit<W>(
    config: &ResolvedConfig,
    sink: &mut W,
    header_path: &Path,
) -> Result<UnitSummary>
where
    W: Write + ?Sized,
{
    let file_count = config.input_files.len();
    if file_count == 0 {
        warn!("No input files given; {} will be empty", header_path.display());
    } else {
        info!("Ready to process {} file(s).", file_count);
    }

    let namespace = config.active_namespace().map(normalize_identifier);
    let write_err = |e: io::Error| RecEmError::output(header_path, e);

    write!(sink, "{PRAGMA_ONCE}\n\n").map_err(write_err)?;
    if let Some(name) = &namespace {
        write!(sink, "\nnamespace {name} {{").map_err(write_err)?;
    }
    writeln!(sink).map_err(write_err)?;

    let mut declarations = Vec::with_capacity(file_count);
    for path in &config.input_files {
        info!("  {}", path.display());
        declarations.push(emit_declaration(
            path,
            &mut *sink,
            header_path,
            &config.encoder,
        )?);
    }

    if namespace.is_some() {
        writeln!(sink, "}}").map_err(write_err)?;
    }
    writeln!(sink).map_err(write_err)?;

    Ok(UnitSummary {
        header_path: header_path.to_path_buf(),
        declarations,
    })
}

/// Create the header file named by `config` and write it.
///
/// The output directory must already exist. A failure part way through
/// leaves a truncated header behind.
pub fn write_unit(config: &ResolvedConfig) -> Result<UnitSummary> {
    let header_path = config.header_path();
    info!("Generating {}", header_path.display());

    // TODO: write to a sibling temp file and rename into place so a failed run keeps the previous header
    let file = File::create(&header_path).map_err(|e| RecEmError::output(&header_path, e))?;
    let mut sink = BufWriter::new(file);

    let summary = assemble_unit(config, &mut sink, &header_path)?;
    sink.flush()
        .map_err(|e| RecEmError::output(&header_path, e))?;

    info!(
        "Embedded {} file(s), {} byte(s) into {}",
        summary.declarations.len(),
        summary.total_bytes(),
        header_path.display()
    );
    Ok(summary)
}

#[cfg(test)]
#[path = "unit_tests.rs"]
mod tests;
