//! Run parameters for gram discovery
//!
//! Every value is fixed once scanning starts. Sources are layered as
//! built-in defaults, then an optional TOML file, then command-line flags.

use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_GRAMSIZE: usize = 2;
pub const DEFAULT_EDITDIST: usize = 0;
pub const DEFAULT_BUFFER_SIZE: usize = 1500;
pub const DEFAULT_MAX_FILES: usize = 200;
pub const DEFAULT_BUCKET_DEPTH: usize = 500;
pub const DEFAULT_FILE_HITS: usize = 200;
pub const DEFAULT_TOP_BYTES: usize = 10;

pub const LIMIT_EDITDIST: usize = 5;
pub const LIMIT_BUFFER_SIZE: usize = 8000;
pub const LIMIT_MAX_FILES: usize = 18000;
pub const LIMIT_BUCKET_DEPTH: usize = 4096;
pub const LIMIT_FILE_HITS: usize = 4096;
pub const LIMIT_JOBS: usize = 256;

/// Configuration for one bingram run
///
/// # Example
/// ```
/// use bingram::config::BingramConfig;
///
/// let config = BingramConfig::default();
/// assert_eq!(config.gramsize, 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BingramConfig {
    /// Minimum run length reported as a gram
    pub gramsize: usize,

    /// Number of mismatched byte positions tolerated when merging two grams
    /// of equal length
    pub editdist: usize,

    /// Largest accepted file, in bytes
    pub buffer_size: usize,

    /// Maximum number of files loaded into the corpus
    pub max_files: usize,

    /// Registry capacity per leading byte value
    pub bucket_depth: usize,

    /// Occurrence log capacity per file
    pub file_hits: usize,

    /// Compute per-file byte histograms
    pub histogram: bool,

    /// Entries in the most-common-bytes summary
    pub top_bytes: usize,

    /// Parallel pair-scan workers
    pub jobs: usize,
}

impl Default for BingramConfig {
    fn default() -> Self {
        Self {
            gramsize: DEFAULT_GRAMSIZE,
            editdist: DEFAULT_EDITDIST,
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_files: DEFAULT_MAX_FILES,
            bucket_depth: DEFAULT_BUCKET_DEPTH,
            file_hits: DEFAULT_FILE_HITS,
            histogram: false,
            top_bytes: DEFAULT_TOP_BYTES,
            jobs: 1,
        }
    }
}

fn check(field: &'static str, value: usize, min: usize, max: usize) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl BingramConfig {
    /// Load a configuration file; fields left out keep their defaults
    ///
    /// # Example TOML
    /// ```toml
    /// gramsize = 4
    /// editdist = 1
    /// buffer_size = 4096
    /// histogram = true
    /// ```
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;
        toml::from_str(&content).with_context(|| {
            format!("Failed to parse config file: {}", path.as_ref().display())
        })
    }

    /// Check every bound; the first violation is returned
    ///
    /// `buffer_size` is checked first since it bounds `gramsize`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("buffersize", self.buffer_size, 1, LIMIT_BUFFER_SIZE - 1)?;
        check("gramsize", self.gramsize, 1, self.buffer_size.saturating_sub(1).max(1))?;
        check("editdist", self.editdist, 0, LIMIT_EDITDIST)?;
        check("maxfiles", self.max_files, 1, LIMIT_MAX_FILES - 1)?;
        check("depth", self.bucket_depth, 1, LIMIT_BUCKET_DEPTH)?;
        check("file-hits", self.file_hits, 1, LIMIT_FILE_HITS)?;
        check("top-bytes", self.top_bytes, 1, 256)?;
        check("jobs", self.jobs, 1, LIMIT_JOBS)?;
        Ok(())
    }
}
