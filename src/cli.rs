// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The file argument is an Option: when it's missing we print our own usage
// message and exit with code 1, instead of clap's usual exit 2.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "md-link-checker",
    version,
    about = "Check every link in a markdown file and report the broken ones",
    long_about = "md-link-checker finds all [label](http(s)://...) links in a markdown file, \
                  sends a HEAD request to each unique URL at the same time, and prints \
                  an OK/BROKEN line per link followed by a summary."
)]
pub struct Cli {
    /// Path to the markdown file to check
    ///
    /// This is a positional argument (no flag needed)
    pub file: Option<PathBuf>,

    /// Output results in JSON format instead of text lines
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Give up on a link after this many seconds (default: no limit)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

// Usage text printed to stderr when no file is given
pub fn usage() -> String {
    format!(
        "Usage: {} [OPTIONS] <FILE>\n\nTry '--help' for more information.",
        env!("CARGO_PKG_NAME")
    )
}
