//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Elapsed-time results for orienteering races.
///
/// Reads timestamped checkpoint punches, matches them against configured
/// courses, and produces ranked elapsed-time results, including multi-lap
/// races sharing one lap control.
#[derive(Debug, Parser)]
#[command(name = "otime", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute ranked elapsed times from a punch-record file.
    Results {
        /// Punch-record file.
        input: PathBuf,

        /// Input format; inferred from the file extension when omitted.
        #[arg(long, value_enum)]
        format: Option<InputFormat>,

        /// Standalone course file overriding the configured courses.
        #[arg(long)]
        courses: Option<PathBuf>,

        /// Lap control overriding the configured one.
        #[arg(long)]
        lap_control: Option<String>,

        /// Emit a result for every course a runner satisfies.
        #[arg(long)]
        all_matches: bool,

        /// Emit JSON instead of the placed table.
        #[arg(long)]
        json: bool,
    },

    /// List the configured courses.
    Courses {
        /// Emit JSON instead of the table.
        #[arg(long)]
        json: bool,
    },

    /// Validate the course configuration.
    Check,
}

/// Punch-record file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// JSON Lines, one runner record per line.
    Jsonl,
    /// Semicolon/dash-delimited inline punch strings.
    Punchcard,
}
