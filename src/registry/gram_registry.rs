use crate::gram::Gram;
use crate::registry::{Bucket, Offer, RegistryStats};

const BUCKETS: usize = 256;

/// Catalogue of distinct grams seen anywhere in the corpus
///
/// # Example Usage
/// ```
/// use bingram::corpus::ByteSequence;
/// use bingram::gram::Gram;
/// use bingram::registry::{GramRegistry, Offer};
///
/// let a = ByteSequence::new("a", b"hello".to_vec());
/// let b = ByteSequence::new("b", b"hello".to_vec());
///
/// let mut registry = GramRegistry::new(500, 0);
/// assert_eq!(registry.offer(Gram::new(&a, 0, 5).unwrap()), Offer::Accepted);
/// assert_eq!(registry.offer(Gram::new(&b, 0, 5).unwrap()), Offer::Merged);
/// assert_eq!(registry.len(), 1);
/// assert_eq!(registry.iter().next().unwrap().count(), 2);
/// ```
#[derive(Debug)]
pub struct GramRegistry<'c> {
    buckets: Vec<Bucket<'c>>,
    editdist: usize,
    stats: RegistryStats,
}

impl<'c> GramRegistry<'c> {
    /// Registry with `depth` slots per bucket and a mismatch tolerance of
    /// `editdist` bytes
    pub fn new(depth: usize, editdist: usize) -> Self {
        Self {
            buckets: (0..BUCKETS).map(|_| Bucket::new(depth)).collect(),
            editdist,
            stats: RegistryStats::default(),
        }
    }

    /// Offer a candidate gram
    ///
    /// A match within tolerance is merged: its count goes up and it now
    /// points at the candidate's location. A match that overlaps the stored
    /// range in the same sequence is rejected without counting. Anything
    /// else takes a free slot, or is rejected if the bucket is full.
    pub fn offer(&mut self, candidate: Gram<'c>) -> Offer {
        let lead = candidate.lead();
        let offer = self.buckets[lead as usize].offer(candidate, self.editdist);
        self.stats.record(offer);

        match offer {
            Offer::Accepted => tracing::trace!(
                "adding gram at {}, {:02X}",
                candidate.offset(),
                lead
            ),
            Offer::Rejected(reason) => tracing::trace!(
                ?reason,
                offset = candidate.offset(),
                length = candidate.length(),
                "gram rejected in bucket {:02X}",
                lead
            ),
            Offer::Merged => {}
        }
        offer
    }

    pub fn bucket(&self, lead: u8) -> &Bucket<'c> {
        &self.buckets[lead as usize]
    }

    /// Every stored gram, bucket by bucket then slot by slot
    pub fn iter(&self) -> impl Iterator<Item = &Gram<'c>> + '_ {
        self.buckets.iter().flat_map(|bucket| bucket.grams().iter())
    }

    /// Number of distinct grams stored
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Bucket::is_empty)
    }

    pub fn editdist(&self) -> usize {
        self.editdist
    }

    pub fn stats(&self) -> RegistryStats {
        self.stats
    }
}
