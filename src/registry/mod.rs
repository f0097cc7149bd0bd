// Bounded approximate-match gram registry
//
// Grams discovered in every file pair are merged into one catalogue. The
// catalogue is split into 256 buckets keyed by a gram's first byte; within a
// bucket, grams of equal length whose bytes differ in at most `editdist`
// positions are treated as the same gram and counted together.
//
// Each bucket holds at most `depth` entries. Once full, new distinct grams
// for that leading byte are rejected, and the rejection is reported back to
// the caller instead of overwriting an existing entry.

mod bucket;
mod gram_registry;
mod outcome;

pub use bucket::Bucket;
pub use gram_registry::GramRegistry;
pub use outcome::{Offer, RegistryStats, RejectReason};
