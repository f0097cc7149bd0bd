//! Per-file occurrence log: where registered grams were found in each file
//!
//! The log is bounded. When it is full, new hits are dropped and counted;
//! stored entries are never overwritten. This only affects reporting, the
//! registry is unaffected.

use serde::Serialize;

/// One hit, in the owning file's coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub offset: usize,
    pub length: usize,
}

impl Occurrence {
    /// The hit's bytes within the owning file
    pub fn slice<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        &bytes[self.offset..self.offset + self.length]
    }
}

/// Bounded, insertion-ordered list of hits for one file
#[derive(Debug, Clone)]
pub struct FileOccurrenceLog {
    hits: Vec<Occurrence>,
    capacity: usize,
    dropped: u64,
}

impl FileOccurrenceLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            hits: Vec::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Append a hit if there is room; returns whether it was stored
    pub fn record(&mut self, offset: usize, length: usize) -> bool {
        if self.hits.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        self.hits.push(Occurrence { offset, length });
        true
    }

    pub fn hits(&self) -> &[Occurrence] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.hits.len() >= self.capacity
    }

    /// Hits that arrived after the log was full
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
