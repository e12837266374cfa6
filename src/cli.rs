//! Command-line interface of the `cmdutil-demo` binary
//!
//! Each subcommand exercises one library operation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_CONFIRM_MESSAGE: &str = "Are you sure that you want to confirm? (y/[n]) ";

#[derive(Parser, Debug)]
#[command(name = "cmdutil-demo")]
#[command(about = "Exercise cmdutil's usage, warn, fail and confirm helpers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML file with prog_name, usage_message and synopses
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Print the usage message and exit with status 2")]
    Usage {
        #[arg(short, long, help = "Warning to print before the usage")]
        warning: Option<String>,
    },

    #[command(about = "Print a warning and exit successfully")]
    Warn {
        #[arg(help = "Warning text")]
        message: String,
    },

    #[command(about = "Print an error and exit")]
    Fail {
        #[arg(short, long, help = "Exit status (default 1)", allow_negative_numbers = true)]
        status: Option<i32>,
        #[arg(help = "Error text")]
        message: String,
    },

    #[command(about = "Stat a path and fail with the wrapped error if that fails")]
    Stat {
        #[arg(help = "Path to stat", default_value = "/nonexistent_file")]
        path: PathBuf,
    },

    #[command(about = "Ask a yes/no question; exit 0 on yes, 1 otherwise")]
    Confirm {
        #[arg(help = "Prompt text", default_value = DEFAULT_CONFIRM_MESSAGE)]
        message: String,
    },

    #[command(about = "Print a line forever, exiting cleanly when the reader goes away")]
    Yes {
        #[arg(help = "Line to print", default_value = "y")]
        text: String,
    },
}
