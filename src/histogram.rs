//! Byte-value histograms
//!
//! Raw byte counting, unrelated to gram matching. Each file can carry one,
//! and the report aggregates them into a corpus-wide summary.

use serde::{Serialize, Serializer};

/// One counter per byte value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteHistogram {
    counts: [u64; 256],
}

impl Default for ByteHistogram {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl ByteHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every byte of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut histogram = Self::new();
        histogram.add_bytes(bytes);
        histogram
    }

    pub fn add_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.counts[b as usize] += 1;
        }
    }

    /// Add another histogram's counters into this one
    pub fn merge(&mut self, other: &ByteHistogram) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    pub fn counts(&self) -> &[u64; 256] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Most common byte values, highest count first
    ///
    /// Ties are broken by the smaller byte value. Zero counts are skipped.
    pub fn top(&self, k: usize) -> Vec<(u8, u64)> {
        let mut entries: Vec<(u8, u64)> = self
            .counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
            .collect();

        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries.truncate(k);
        entries
    }
}

impl Serialize for ByteHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.counts.iter())
    }
}
