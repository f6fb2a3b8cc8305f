//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "humpf", version, about = "Sample and plot damped spring timelines")]
pub struct Cli {
    /// Timeline TOML; without it a single default spring from 0 to 1 is used
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit JSON (logs, samples and errors) instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); overrides [logging].level
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print position and velocity at evenly spaced times
    Sample {
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        from: f64,
        #[arg(long, default_value_t = 2000.0, allow_negative_numbers = true)]
        to: f64,
        /// Distance between samples (caller time units)
        #[arg(long, default_value_t = 100.0)]
        step: f64,
    },
    /// Draw the timeline as an ASCII graph
    Plot {
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        from: f64,
        #[arg(long, default_value_t = 2000.0, allow_negative_numbers = true)]
        to: f64,
        #[arg(long, default_value_t = 60)]
        width: usize,
        #[arg(long, default_value_t = 16)]
        height: usize,
        /// Plot velocity instead of position
        #[arg(long, action = ArgAction::SetTrue)]
        velocity: bool,
    },
    /// List the steps of the timeline with their solved regimes
    Inspect,
}
