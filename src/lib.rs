//! # rec-em: embed binary files as generated C++ byte arrays
//!
//! Converts a file, or every file under a directory, into a single C++
//! header. For each input the header carries the original filename, the
//! byte count and an `unsigned char` array holding the contents, optionally
//! wrapped in a namespace, ready to be compiled into another binary.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     rec_em binary (CLI)                   │
//! ├───────────────────────────────────────────────────────────┤
//! │  core                   │  codegen                        │
//! │ • Errors                │ • SymbolNamer      (symbol)     │
//! │ • Config layers         │ • ByteEncoder      (encoder)    │
//! │ • Input discovery       │ • Declarations     (declaration)│
//! │                         │ • UnitAssembler    (unit)       │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rec_em::{write_unit, ResolvedConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ResolvedConfig::new(vec!["assets/logo.png".into()])
//!         .with_namespace("assets")
//!         .with_output_directory("generated");
//!
//!     let summary = write_unit(&config)?;
//!     println!("Wrote {}", summary.header_path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Errors, configuration and input resolution
pub mod core {
    //! Error types, configuration layers and input discovery.

    pub mod config;
    pub mod discovery;
    pub mod errors;
}

// Header generation pipeline
pub mod codegen {
    //! The encoding and code-generation pipeline.

    pub mod declaration;
    pub mod encoder;
    pub mod symbol;
    pub mod unit;
}

// Re-export primary types for convenience
pub use codegen::declaration::{emit_declaration, DeclarationSummary};
pub use codegen::encoder::{encode, EncoderOptions};
pub use codegen::symbol::{symbol_stem, SymbolStem};
pub use codegen::unit::{assemble_unit, write_unit, UnitSummary};
pub use crate::core::config::{EmbedConfig, ResolvedConfig};
pub use crate::core::discovery::{resolve_inputs, InputOrder};
pub use crate::core::errors::{RecEmError, Result, ResultExt};
