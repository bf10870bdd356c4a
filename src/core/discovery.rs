//! Expansion of command-line inputs into the flat list of files to embed.
//!
//! A file argument is taken as is. A directory argument is walked
//! recursively and every regular file under it is added, in the order the
//! filesystem yields them. That order differs between platforms and even
//! between filesystems, so callers wanting byte-identical headers across
//! machines should ask for sorted output.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::core::errors::{RecEmError, Result};

/// How expanded inputs are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputOrder {
    /// Argument order, each directory in filesystem walk order
    #[default]
    Traversal,
    /// Lexicographic by path across all inputs
    Sorted,
}

impl InputOrder {
    /// `Sorted` when `sort` is set
    pub fn from_sort_flag(sort: bool) -> Self {
        if sort {
            Self::Sorted
        } else {
            Self::Traversal
        }
    }
}

/// Expand `inputs` into the files to embed.
///
/// Fails on the first argument that is neither a regular file nor a
/// directory. Directories with no files contribute nothing.
pub fn resolve_inputs(inputs: &[PathBuf], order: InputOrder) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            collect_directory(input, &mut files)?;
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(RecEmError::InputNotFound {
                path: input.clone(),
            });
        }
    }

    if order == InputOrder::Sorted {
        files.sort();
    }

    Ok(files)
}

fn collect_directory(root: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let before = files.len();

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.push(path.to_path_buf());
        }
    }

    debug!(
        "Found {} file(s) under {}",
        files.len() - before,
        root.display()
    );
    Ok(())
}
