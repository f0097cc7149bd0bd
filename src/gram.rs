//! Gram: a borrowed view of a byte run inside a corpus sequence

use crate::corpus::ByteSequence;

/// A contiguous run of bytes within a [`ByteSequence`]
///
/// A gram never copies bytes; it borrows its source, so it cannot outlive
/// the corpus that owns the data.
#[derive(Debug, Clone, Copy)]
pub struct Gram<'c> {
    source: &'c ByteSequence,
    offset: usize,
    length: usize,
    count: u32,
}

impl<'c> Gram<'c> {
    /// View `length` bytes of `source` starting at `offset`
    ///
    /// Returns `None` for an empty or out-of-bounds range.
    pub fn new(source: &'c ByteSequence, offset: usize, length: usize) -> Option<Self> {
        let end = offset.checked_add(length)?;
        if length == 0 || end > source.len() {
            return None;
        }
        Some(Self {
            source,
            offset,
            length,
            count: 1,
        })
    }

    pub fn source(&self) -> &'c ByteSequence {
        self.source
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of distinct occurrences merged into this gram
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn bytes(&self) -> &'c [u8] {
        &self.source.bytes()[self.offset..self.offset + self.length]
    }

    /// First byte of the run, used as the registry bucket key
    pub fn lead(&self) -> u8 {
        self.source.bytes()[self.offset]
    }

    /// True if both grams view the same sequence and their ranges intersect
    pub fn overlaps(&self, other: &Gram<'_>) -> bool {
        std::ptr::eq(self.source, other.source)
            && self.offset < other.offset + other.length
            && other.offset < self.offset + self.length
    }

    /// Count positions where the two grams differ, giving up past `limit`
    ///
    /// Returns `None` when the lengths differ or more than `limit` positions
    /// mismatch.
    pub fn mismatches_within(&self, other: &Gram<'_>, limit: usize) -> Option<usize> {
        if self.length != other.length {
            return None;
        }
        let mut mismatches = 0;
        for (a, b) in self.bytes().iter().zip(other.bytes()) {
            if a != b {
                mismatches += 1;
                if mismatches > limit {
                    return None;
                }
            }
        }
        Some(mismatches)
    }

    /// Take over `other`'s location and bump the occurrence count
    pub(crate) fn absorb(&mut self, other: &Gram<'c>) {
        self.source = other.source;
        self.offset = other.offset;
        self.length = other.length;
        self.count = self.count.saturating_add(1);
    }

    /// Uppercase hex rendering of the gram's bytes
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.bytes())
    }
}
