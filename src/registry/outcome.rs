use serde::Serialize;

/// Why the registry refused a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The candidate matches a stored gram whose range it overlaps in the
    /// same sequence: it is the same physical bytes seen from another diagonal
    Overlap,
    /// No stored gram matches and the bucket is at capacity
    BucketFull,
}

/// Outcome of offering a candidate gram to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Offer {
    /// Stored as a new entry with count 1
    Accepted,
    /// Merged into an existing entry, whose count was incremented
    Merged,
    /// Not stored; nothing changed
    Rejected(RejectReason),
}

impl Offer {
    /// Accepted and merged grams are recorded in the file occurrence logs
    pub fn is_registered(&self) -> bool {
        matches!(self, Offer::Accepted | Offer::Merged)
    }
}

/// Running totals of registry outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub accepted: u64,
    pub merged: u64,
    pub rejected_overlap: u64,
    pub rejected_bucket_full: u64,
}

impl RegistryStats {
    pub(crate) fn record(&mut self, offer: Offer) {
        match offer {
            Offer::Accepted => self.accepted += 1,
            Offer::Merged => self.merged += 1,
            Offer::Rejected(RejectReason::Overlap) => self.rejected_overlap += 1,
            Offer::Rejected(RejectReason::BucketFull) => self.rejected_bucket_full += 1,
        }
    }

    /// Total number of candidates offered
    pub fn offered(&self) -> u64 {
        self.accepted + self.merged + self.rejected_overlap + self.rejected_bucket_full
    }
}
