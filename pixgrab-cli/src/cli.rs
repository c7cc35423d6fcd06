// ABOUTME: CLI argument definitions for the pixgrab application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::timeouts::MAX_TIMEOUT_SECS;

#[derive(Parser, Debug)]
#[command(name = "pixgrab")]
#[command(about = "Find and save the largest public images behind a URL", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Per-request timeout in seconds (overrides config)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS))]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List candidate image URLs without downloading them
    Resolve {
        /// Page, post, profile, or video URL
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Pretty print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// Download every candidate and report its resolution
    Inspect {
        /// Page, post, profile, or video URL
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Pretty print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// Download every candidate and write it to disk
    Save {
        /// Page, post, profile, or video URL
        url: String,

        /// Output directory (defaults to config output_dir, then the current directory)
        #[arg(long, short, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// Classify local image files by resolution
    Classify {
        /// Image files to classify
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which platform strategy handles a URL
    Route {
        /// URL to route
        url: String,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (omit for installation help)
        #[arg(value_enum)]
        shell: Option<crate::completions::Shell>,
    },
}
