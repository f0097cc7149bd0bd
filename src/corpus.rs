//! Corpus collection: turning paths into in-memory byte sequences
//!
//! Directories are walked recursively in name order, skipping dot entries
//! and symlinks to directories; paths named explicitly are always followed.
//! Files that break the size or count limits are rejected one by one; the
//! walk never aborts on a single bad entry.

use crate::error::CollectError;
use crate::histogram::ByteHistogram;
use std::fs;
use std::path::{Path, PathBuf};

/// An immutable binary blob with an identifying name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteSequence {
    id: String,
    bytes: Vec<u8>,
    histogram: Option<ByteHistogram>,
}

impl ByteSequence {
    pub fn new(id: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            bytes,
            histogram: None,
        }
    }

    /// Attach a byte histogram computed from this sequence's contents
    pub fn with_histogram(mut self) -> Self {
        self.histogram = Some(ByteHistogram::from_bytes(&self.bytes));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn histogram(&self) -> Option<&ByteHistogram> {
        self.histogram.as_ref()
    }
}

/// Limits applied while collecting
#[derive(Debug, Clone, Copy)]
pub struct CollectLimits {
    /// Largest accepted file in bytes
    pub buffer_size: usize,
    /// Maximum number of accepted files
    pub max_files: usize,
    /// Compute a histogram for every accepted file
    pub histogram: bool,
}

/// The set of byte sequences for one run, in collection order
#[derive(Debug, Default)]
pub struct Corpus {
    sequences: Vec<ByteSequence>,
    rejected: Vec<CollectError>,
}

impl Corpus {
    /// Build a corpus directly from sequences, bypassing the filesystem
    pub fn from_sequences(sequences: Vec<ByteSequence>) -> Self {
        Self {
            sequences,
            rejected: Vec::new(),
        }
    }

    /// Collect every path (files or directories) under the given limits
    pub fn collect<P: AsRef<Path>>(paths: &[P], limits: CollectLimits) -> Self {
        let mut corpus = Self::default();
        for path in paths {
            corpus.add_path(path.as_ref(), &limits);
        }
        tracing::debug!(
            accepted = corpus.sequences.len(),
            rejected = corpus.rejected.len(),
            "corpus collected"
        );
        corpus
    }

    pub fn sequences(&self) -> &[ByteSequence] {
        &self.sequences
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Entries that were not loaded, with the reason for each
    pub fn rejected(&self) -> &[CollectError] {
        &self.rejected
    }

    fn reject(&mut self, err: CollectError) {
        tracing::warn!("{}", err);
        self.rejected.push(err);
    }

    fn add_path(&mut self, path: &Path, limits: &CollectLimits) {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(source) => {
                self.reject(CollectError::Io {
                    path: path.to_path_buf(),
                    source,
                });
                return;
            }
        };

        if metadata.is_dir() {
            self.add_dir(path, limits);
        } else if metadata.is_file() {
            self.add_file(path, metadata.len(), limits);
        } else {
            self.reject(CollectError::NotRegular {
                path: path.to_path_buf(),
            });
        }
    }

    fn add_dir(&mut self, dir: &Path, limits: &CollectLimits) {
        tracing::debug!("loading dir {}", dir.display());

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(source) => {
                self.reject(CollectError::Io {
                    path: dir.to_path_buf(),
                    source,
                });
                return;
            }
        };

        let mut children: Vec<PathBuf> = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => {
                    if entry.file_name().to_string_lossy().starts_with('.') {
                        continue;
                    }
                    let path = entry.path();
                    if is_dir_symlink(&entry) {
                        tracing::debug!("skipping directory symlink {}", path.display());
                        continue;
                    }
                    children.push(path);
                }
                Err(source) => self.reject(CollectError::Io {
                    path: dir.to_path_buf(),
                    source,
                }),
            }
        }

        // readdir order is filesystem dependent
        children.sort();
        for child in children {
            self.add_path(&child, limits);
        }
    }

    fn add_file(&mut self, path: &Path, size: u64, limits: &CollectLimits) {
        if self.sequences.len() >= limits.max_files {
            self.reject(CollectError::FileLimit {
                path: path.to_path_buf(),
                limit: limits.max_files,
            });
            return;
        }
        if size == 0 {
            self.reject(CollectError::Empty {
                path: path.to_path_buf(),
            });
            return;
        }
        if size > limits.buffer_size as u64 {
            self.reject(CollectError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: limits.buffer_size,
            });
            return;
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(source) => {
                self.reject(CollectError::Io {
                    path: path.to_path_buf(),
                    source,
                });
                return;
            }
        };

        // The file may have changed between stat and read
        if bytes.len() > limits.buffer_size {
            self.reject(CollectError::TooLarge {
                path: path.to_path_buf(),
                size: bytes.len() as u64,
                limit: limits.buffer_size,
            });
            return;
        }
        if bytes.is_empty() {
            self.reject(CollectError::Empty {
                path: path.to_path_buf(),
            });
            return;
        }

        tracing::debug!("loading file {} ({} bytes)", path.display(), bytes.len());
        let mut sequence = ByteSequence::new(path.display().to_string(), bytes);
        if limits.histogram {
            sequence = sequence.with_histogram();
        }
        self.sequences.push(sequence);
    }
}

/// Directory entry that is a symlink resolving to a directory
fn is_dir_symlink(entry: &fs::DirEntry) -> bool {
    let is_link = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
    is_link && fs::metadata(entry.path()).map(|m| m.is_dir()).unwrap_or(false)
}
