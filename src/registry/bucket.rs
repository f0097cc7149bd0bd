use crate::gram::Gram;
use crate::registry::{Offer, RejectReason};

/// Grams sharing one leading byte value, in insertion (slot) order
#[derive(Debug, Clone)]
pub struct Bucket<'c> {
    slots: Vec<Gram<'c>>,
    depth: usize,
}

impl<'c> Bucket<'c> {
    pub(crate) fn new(depth: usize) -> Self {
        Self {
            slots: Vec::new(),
            depth,
        }
    }

    /// Merge `candidate` into the first matching slot, or append it
    ///
    /// Slots are probed in order; the first one within `editdist`
    /// mismatches decides the outcome.
    pub(crate) fn offer(&mut self, candidate: Gram<'c>, editdist: usize) -> Offer {
        for slot in self.slots.iter_mut() {
            if slot.mismatches_within(&candidate, editdist).is_none() {
                continue;
            }
            if slot.overlaps(&candidate) {
                return Offer::Rejected(RejectReason::Overlap);
            }
            slot.absorb(&candidate);
            return Offer::Merged;
        }

        if self.is_full() {
            return Offer::Rejected(RejectReason::BucketFull);
        }
        self.slots.push(candidate);
        Offer::Accepted
    }

    pub fn grams(&self) -> &[Gram<'c>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.depth
    }
}
