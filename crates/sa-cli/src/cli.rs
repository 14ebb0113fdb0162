//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Work shift statistics from a calendar file.
///
/// Picks the events whose title contains the shift keyword, groups them into
/// days and ISO weeks, and prints mean durations and the share of crunch days.
#[derive(Debug, Parser)]
#[command(name = "shifts", version, about, long_about = None)]
pub struct Cli {
    /// Path to the iCalendar (.ics) file.
    #[arg(value_name = "PATH_TO_ICS")]
    pub path_to_ics: PathBuf,

    /// Title substring marking an event as a shift [default: Shift].
    #[arg(short, long)]
    pub shift_keyword: Option<String>,

    /// Title substring marking a shift as crunch [default: Crunch].
    #[arg(short, long)]
    pub crunch_keyword: Option<String>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}
