//! CLI Module Organization
//!
//! This module organizes the CLI functionality into cohesive sub-modules:
//! - args: CLI argument structures and the pure argv resolution step
//! - commands: Input resolution, output directory preparation, header generation
//! - config_layer: Configuration layer management and merging

pub mod args;
pub mod commands;
pub mod config_layer;

// Re-export commonly used items for convenience
pub use args::*;
pub use commands::*;
