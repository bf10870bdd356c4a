//! rec_em CLI - embed binary files into a generated C++ header.
//!
//! Argument handling, logging setup and process exit status live here; the
//! header pipeline itself is in the `rec_em` library.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Resolution};

fn main() -> ExitCode {
    let cli = match cli::parse_args(std::env::args_os()) {
        Resolution::Run(cli) => cli,
        Resolution::EarlyExit {
            code,
            message,
            to_stderr,
        } => {
            if to_stderr {
                eprint!("{message}");
            } else {
                print!("{message}");
            }
            return ExitCode::from(code);
        }
    };

    init_tracing(&cli);

    match cli::embed_command(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing/logging on stderr; `RUST_LOG` wins over the flags.
fn init_tracing(cli: &Cli) {
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
