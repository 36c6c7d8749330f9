//! Command-line argument definitions for the Feyndraw CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the gesture script to replay, where the
//! report goes, which configuration file to load, and the log verbosity.

use clap::Parser;

/// Replays a scripted editing session against a Feynman diagram
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the session script (TOML)
    #[arg(help = "Path to the session script")]
    pub input: String,

    /// Path of the report file; the report goes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
