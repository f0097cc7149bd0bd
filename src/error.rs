//! Error types for configuration and corpus collection

use std::path::PathBuf;
use thiserror::Error;

/// Invalid run parameter, detected before any file is read
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric parameter fell outside its allowed range
    #[error("invalid {field}: {value} (allowed {min} to {max})")]
    OutOfRange {
        field: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
}

/// Why a single path was not added to the corpus
///
/// Rejections are per item: the collector keeps going after any of these.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: file size {size} exceeds buffer size {limit} (check -b)")]
    TooLarge {
        path: PathBuf,
        size: u64,
        limit: usize,
    },

    #[error("{path}: empty file")]
    Empty { path: PathBuf },

    #[error("{path}: not a regular file or directory")]
    NotRegular { path: PathBuf },

    #[error("{path}: file limit of {limit} reached (check -f)")]
    FileLimit { path: PathBuf, limit: usize },
}

impl CollectError {
    /// Path of the rejected entry
    pub fn path(&self) -> &std::path::Path {
        match self {
            CollectError::Io { path, .. }
            | CollectError::TooLarge { path, .. }
            | CollectError::Empty { path }
            | CollectError::NotRegular { path }
            | CollectError::FileLimit { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_field_and_bound() {
        let err = ConfigError::OutOfRange {
            field: "editdist",
            value: 9,
            min: 0,
            max: 5,
        };
        assert_eq!(err.to_string(), "invalid editdist: 9 (allowed 0 to 5)");
    }

    #[test]
    fn test_collect_error_path() {
        let err = CollectError::TooLarge {
            path: PathBuf::from("/tmp/big.bin"),
            size: 9000,
            limit: 1500,
        };
        assert_eq!(err.path(), std::path::Path::new("/tmp/big.bin"));
        assert!(err.to_string().contains("exceeds buffer size 1500"));
    }
}
