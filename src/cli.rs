//! CLI argument parsing for bingram

use crate::config::BingramConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for gram reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "bingram")]
#[command(version)]
#[command(
    about = "Show common sequences of bytes (grams) across multiple binary files",
    long_about = None
)]
pub struct Cli {
    /// Files or directories to compare (directories are walked recursively)
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Minimum size of a gram used in comparisons
    #[arg(short = 'g', long = "gramsize", value_name = "BYTES")]
    pub gramsize: Option<usize>,

    /// Mismatched bytes tolerated when merging grams of equal length
    #[arg(short = 'e', long = "editdist", value_name = "N")]
    pub editdist: Option<usize>,

    /// Maximum size of a file in bytes (default 1500)
    #[arg(short = 'b', long = "buffersize", value_name = "BYTES")]
    pub buffer_size: Option<usize>,

    /// Process up to this many files (default 200)
    #[arg(short = 'f', long = "maxfiles", value_name = "N")]
    pub max_files: Option<usize>,

    /// Distinct grams kept per leading byte value (default 500)
    #[arg(short = 'd', long = "depth", value_name = "N")]
    pub bucket_depth: Option<usize>,

    /// Hits kept per file (default 200)
    #[arg(long = "file-hits", value_name = "N")]
    pub file_hits: Option<usize>,

    /// Compute byte histograms and summarize the most common bytes
    #[arg(short = 'i', long = "histogram")]
    pub histogram: bool,

    /// Number of entries in the most-common-bytes summary (default 10)
    #[arg(long = "top-bytes", value_name = "N")]
    pub top_bytes: Option<usize>,

    /// Parallel pair-scan workers (default 1)
    #[arg(short = 'j', long = "jobs", value_name = "N")]
    pub jobs: Option<usize>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Load settings from a TOML file; flags given here take precedence
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable debug and verbose diagnostics on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Apply flags given on the command line on top of `base`
    pub fn apply_to(&self, base: BingramConfig) -> BingramConfig {
        BingramConfig {
            gramsize: self.gramsize.unwrap_or(base.gramsize),
            editdist: self.editdist.unwrap_or(base.editdist),
            buffer_size: self.buffer_size.unwrap_or(base.buffer_size),
            max_files: self.max_files.unwrap_or(base.max_files),
            bucket_depth: self.bucket_depth.unwrap_or(base.bucket_depth),
            file_hits: self.file_hits.unwrap_or(base.file_hits),
            histogram: self.histogram || base.histogram,
            top_bytes: self.top_bytes.unwrap_or(base.top_bytes),
            jobs: self.jobs.unwrap_or(base.jobs),
        }
    }
}
