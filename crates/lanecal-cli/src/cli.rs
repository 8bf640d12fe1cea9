//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Month-calendar layout engine CLI.
///
/// Lays out an events file into non-overlapping lanes and renders the month
/// grid, standing in for the GUI renderer during development.
#[derive(Debug, Parser)]
#[command(name = "lanecal", version, about, long_about = None)]
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
    /// Lay out a month and print it.
    Show {
        /// Path to a JSON file with an array of events.
        #[arg(long)]
        events: PathBuf,

        /// Year to render (defaults to the current year).
        #[arg(long)]
        year: Option<i32>,

        /// Month to render, 1-12 (defaults to the current month).
        #[arg(long)]
        month: Option<u32>,

        /// First day of the week row (e.g. "sunday", "mon").
        #[arg(long)]
        week_start: Option<String>,

        /// Print the raw layout as JSON instead of the grid.
        #[arg(long)]
        json: bool,
    },

    /// Validate an events file and report per-event problems.
    Check {
        /// Path to a JSON file with an array of events.
        #[arg(long)]
        events: PathBuf,
    },
}
