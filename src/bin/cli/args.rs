//! CLI Argument Structures
//!
//! Argument definitions for the rec_em binary, plus the pure resolution step
//! that turns raw argv into either a parsed [`Cli`] or an early exit.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Embed binary files into a generated C++ header
#[derive(Parser, Debug)]
#[command(name = "rec_em")]
#[command(version = VERSION)]
#[command(disable_version_flag = true)]
#[command(about = "Creates a C++ header embedding files as unsigned char arrays")]
#[command(long_about = "
Creates a C++ header from input files as unsigned char arrays which can be
used as embedded resources in another binary. Next to each array the header
holds the name of the input file and the array length as an unsigned int,
optionally wrapped in a namespace.

INPUT can be a single file or a directory. Every file under a directory is
added to the generated header.

Examples:

  # Creates file1_txt.hpp in embedded_include, inside namespace embedded_file
  rec_em File1.txt -o file1_txt -d embedded_include -n embedded_file

  # One header for every file in ../input_directory, in a stable order
  rec_em ../input_directory -o all_txt_files -d emb_include -n embedded_file --sort
")]
pub struct Cli {
    /// Files or directories to embed
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Output filename for the generated header, without extension [default: rec_em]
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// Directory to write the header to, created if it doesn't exist
    #[arg(short, long, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Namespace wrapping the generated declarations
    #[arg(short, long, value_name = "NAME")]
    pub namespace: Option<String>,

    /// Sort inputs by path instead of filesystem walk order
    #[arg(long)]
    pub sort: bool,

    /// Hex values per array line [default: 20]
    #[arg(long, value_name = "N")]
    pub tokens_per_line: Option<usize>,

    /// YAML configuration file (defaults to ./.rec_em.yml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging for debugging
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

/// Result of resolving raw command-line arguments.
#[derive(Debug)]
pub enum Resolution {
    /// Arguments parsed; run the embed command
    Run(Cli),
    /// Print `message` and exit with `code` without doing any work
    EarlyExit {
        /// Process exit status
        code: u8,
        /// Text to print
        message: String,
        /// Whether `message` belongs on stderr
        to_stderr: bool,
    },
}

/// Resolve `args` (program name first) without touching the process.
///
/// No arguments at all prints the long help and succeeds. `--help` and
/// `--version` exit successfully on stdout; usage errors exit with clap's
/// status on stderr.
pub fn parse_args<I, T>(args: I) -> Resolution
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    if args.len() <= 1 {
        return Resolution::EarlyExit {
            code: 0,
            message: Cli::command().render_long_help().to_string(),
            to_stderr: false,
        };
    }

    match Cli::try_parse_from(args) {
        Ok(cli) => Resolution::Run(cli),
        Err(err) => Resolution::EarlyExit {
            code: u8::try_from(err.exit_code()).unwrap_or(1),
            message: err.render().to_string(),
            to_stderr: err.use_stderr(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Cli {
        match parse_args(args.iter().copied()) {
            Resolution::Run(cli) => cli,
            other => panic!("Expected Run, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_prints_help_and_succeeds() {
        match parse_args(["rec_em"]) {
            Resolution::EarlyExit {
                code,
                message,
                to_stderr,
            } => {
                assert_eq!(code, 0);
                assert!(!to_stderr);
                assert!(message.contains("Usage"));
            }
            other => panic!("Expected EarlyExit, got {other:?}"),
        }
    }

    #[test]
    fn test_short_version_flag() {
        match parse_args(["rec_em", "-v"]) {
            Resolution::EarlyExit { code, message, .. } => {
                assert_eq!(code, 0);
                assert!(message.contains(VERSION));
            }
            other => panic!("Expected EarlyExit, got {other:?}"),
        }
    }

    #[test]
    fn test_help_flag() {
        match parse_args(["rec_em", "--help"]) {
            Resolution::EarlyExit {
                code, to_stderr, ..
            } => {
                assert_eq!(code, 0);
                assert!(!to_stderr);
            }
            other => panic!("Expected EarlyExit, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_option_value_is_usage_error() {
        match parse_args(["rec_em", "input.bin", "-o"]) {
            Resolution::EarlyExit {
                code, to_stderr, ..
            } => {
                assert_eq!(code, 2);
                assert!(to_stderr);
            }
            other => panic!("Expected EarlyExit, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_option_is_usage_error() {
        assert!(matches!(
            parse_args(["rec_em", "input.bin", "--compress"]),
            Resolution::EarlyExit { code: 2, .. }
        ));
    }

    #[test]
    fn test_all_options() {
        let cli = run(&[
            "rec_em",
            "File1.txt",
            "-o",
            "file1_txt",
            "-d",
            "embedded_include",
            "-n",
            "embedded_file",
            "--sort",
            "--tokens-per-line",
            "16",
        ]);

        assert_eq!(cli.inputs, vec![PathBuf::from("File1.txt")]);
        assert_eq!(cli.output.as_deref(), Some("file1_txt"));
        assert_eq!(cli.directory, Some(PathBuf::from("embedded_include")));
        assert_eq!(cli.namespace.as_deref(), Some("embedded_file"));
        assert!(cli.sort);
        assert_eq!(cli.tokens_per_line, Some(16));
    }

    #[test]
    fn test_long_options_and_multiple_inputs() {
        let cli = run(&[
            "rec_em",
            "a.bin",
            "--output",
            "all",
            "--directory",
            "out",
            "--namespace",
            "res",
            "dir",
        ]);

        assert_eq!(
            cli.inputs,
            vec![PathBuf::from("a.bin"), PathBuf::from("dir")]
        );
        assert_eq!(cli.output.as_deref(), Some("all"));
    }

    #[test]
    fn test_options_without_inputs_still_run() {
        let cli = run(&["rec_em", "-n", "assets"]);
        assert!(cli.inputs.is_empty());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(matches!(
            parse_args(["rec_em", "a.bin", "--verbose", "--quiet"]),
            Resolution::EarlyExit { code: 2, .. }
        ));
    }
}
