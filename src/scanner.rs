//! Diagonal (dot-plot) scanner for common byte runs between two sequences
//!
//! Picture `a` along one axis and `b` along the other. Every diagonal of the
//! comparison matrix is one relative alignment of the two sequences. Each
//! diagonal is walked once, byte by byte, and every maximal run of equal
//! bytes that reaches the minimum length is emitted.
//!
//! ```text
//!          b[0] b[1] b[2]
//!   a[0]    d=0  d=-1 d=-2
//!   a[1]    d=1  d=0  d=-1
//!   a[2]    d=2  d=1  d=0
//! ```
//!
//! Diagonals run from `-(len(b)-1)` to `len(a)-1`, so there are
//! `len(a) + len(b) - 1` of them. Runs never cross from one diagonal into
//! the next. Cost is O(len(a) * len(b)) per pair.

/// A maximal run of equal bytes shared by `a` and `b` on one diagonal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunMatch {
    /// Start of the run in `a`
    pub a_offset: usize,
    /// Start of the run in `b`
    pub b_offset: usize,
    /// Number of equal bytes
    pub length: usize,
}

impl RunMatch {
    /// Relative alignment of the run: `a_offset - b_offset`
    pub fn diagonal(&self) -> isize {
        self.a_offset as isize - self.b_offset as isize
    }
}

/// Stateless pairwise scanner
///
/// # Example
/// ```
/// use bingram::scanner::{DiagonalScanner, RunMatch};
///
/// let scanner = DiagonalScanner::new(4);
/// let matches = scanner.scan(b"AABBCCDD", b"XXBBCCYY");
/// assert_eq!(matches, vec![RunMatch { a_offset: 2, b_offset: 2, length: 4 }]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagonalScanner {
    gramsize: usize,
}

impl DiagonalScanner {
    /// Scanner keeping runs of at least `gramsize` bytes (0 is treated as 1)
    pub fn new(gramsize: usize) -> Self {
        Self {
            gramsize: gramsize.max(1),
        }
    }

    pub fn gramsize(&self) -> usize {
        self.gramsize
    }

    /// Number of diagonals for sequences of the given lengths
    pub fn diagonal_count(len_a: usize, len_b: usize) -> usize {
        if len_a == 0 || len_b == 0 {
            0
        } else {
            len_a + len_b - 1
        }
    }

    /// Collect every qualifying run, ordered by diagonal then position
    pub fn scan(&self, a: &[u8], b: &[u8]) -> Vec<RunMatch> {
        let mut matches = Vec::new();
        self.for_each_match(a, b, |m| matches.push(m));
        matches
    }

    /// Stream every qualifying run to `emit`, ordered by diagonal then position
    pub fn for_each_match<F: FnMut(RunMatch)>(&self, a: &[u8], b: &[u8], mut emit: F) {
        if a.is_empty() || b.is_empty() {
            return;
        }

        // d < 0: b is shifted, a starts at 0
        for b_start in (1..b.len()).rev() {
            self.scan_diagonal(a, b, 0, b_start, &mut emit);
        }
        // d >= 0: a is shifted, b starts at 0
        for a_start in 0..a.len() {
            self.scan_diagonal(a, b, a_start, 0, &mut emit);
        }
    }

    fn scan_diagonal<F: FnMut(RunMatch)>(
        &self,
        a: &[u8],
        b: &[u8],
        a_start: usize,
        b_start: usize,
        emit: &mut F,
    ) {
        let lhs = &a[a_start..];
        let rhs = &b[b_start..];
        let overlap = lhs.len().min(rhs.len());

        let mut run = 0;
        for (i, (x, y)) in lhs.iter().zip(rhs).enumerate() {
            if x == y {
                run += 1;
            } else {
                self.flush(a_start, b_start, i, run, emit);
                run = 0;
            }
        }
        self.flush(a_start, b_start, overlap, run, emit);
    }

    /// Emit the run that ended just before position `end` on the diagonal
    #[inline]
    fn flush<F: FnMut(RunMatch)>(
        &self,
        a_start: usize,
        b_start: usize,
        end: usize,
        run: usize,
        emit: &mut F,
    ) {
        // run <= end always holds, so the start never underflows
        if run >= self.gramsize {
            let start = end - run;
            emit(RunMatch {
                a_offset: a_start + start,
                b_offset: b_start + start,
                length: run,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sequences_single_full_run() {
        let data = b"0123456789";
        let matches = DiagonalScanner::new(3).scan(data, data);
        assert_eq!(
            matches,
            vec![RunMatch {
                a_offset: 0,
                b_offset: 0,
                length: 10
            }]
        );
    }

    #[test]
    fn test_run_in_middle() {
        let matches = DiagonalScanner::new(4).scan(b"AABBCCDD", b"XXBBCCYY");
        assert_eq!(
            matches,
            vec![RunMatch {
                a_offset: 2,
                b_offset: 2,
                length: 4
            }]
        );
    }

    #[test]
    fn test_below_threshold_discarded() {
        let matches = DiagonalScanner::new(5).scan(b"AABBCCDD", b"XXBBCCYY");
        assert!(matches.is_empty());
    }

    #[test]
    fn test_single_mismatch_splits_run() {
        // Left run AABBC (5), right run DD (2) is below threshold
        let matches = DiagonalScanner::new(3).scan(b"AABBCCDD", b"AABBCXDD");
        assert_eq!(
            matches,
            vec![RunMatch {
                a_offset: 0,
                b_offset: 0,
                length: 5
            }]
        );

        let matches = DiagonalScanner::new(2).scan(b"AABBCCDD", b"AABBCXDD");
        assert!(matches.contains(&RunMatch {
            a_offset: 6,
            b_offset: 6,
            length: 2
        }));
    }

    #[test]
    fn test_run_touching_sequence_ends() {
        // "xyz" ends a and starts b: diagonal d = 3
        let matches = DiagonalScanner::new(3).scan(b"abcxyz", b"xyzqrs");
        assert_eq!(
            matches,
            vec![RunMatch {
                a_offset: 3,
                b_offset: 0,
                length: 3
            }]
        );
        assert_eq!(matches[0].diagonal(), 3);

        // Mirror: run at the end of b, start of a: diagonal d = -3
        let matches = DiagonalScanner::new(3).scan(b"xyzqrs", b"abcxyz");
        assert_eq!(
            matches,
            vec![RunMatch {
                a_offset: 0,
                b_offset: 3,
                length: 3
            }]
        );
        assert_eq!(matches[0].diagonal(), -3);
    }

    #[test]
    fn test_repeat_found_on_each_diagonal_once() {
        let matches = DiagonalScanner::new(3).scan(b"abcXabc", b"abc");
        assert_eq!(
            matches,
            vec![
                RunMatch {
                    a_offset: 0,
                    b_offset: 0,
                    length: 3
                },
                RunMatch {
                    a_offset: 4,
                    b_offset: 0,
                    length: 3
                },
            ]
        );
    }

    #[test]
    fn test_different_lengths_cover_all_diagonals() {
        // Single byte b matches each 'q' in a
        let matches = DiagonalScanner::new(1).scan(b"qaqaq", b"q");
        let offsets: Vec<usize> = matches.iter().map(|m| m.a_offset).collect();
        assert_eq!(offsets, vec![0, 2, 4]);
    }

    #[test]
    fn test_empty_inputs() {
        let scanner = DiagonalScanner::new(1);
        assert!(scanner.scan(b"", b"abc").is_empty());
        assert!(scanner.scan(b"abc", b"").is_empty());
        assert_eq!(DiagonalScanner::diagonal_count(0, 5), 0);
        assert_eq!(DiagonalScanner::diagonal_count(8, 8), 15);
    }

    #[test]
    fn test_zero_gramsize_treated_as_one() {
        let scanner = DiagonalScanner::new(0);
        assert_eq!(scanner.gramsize(), 1);
        assert_eq!(scanner.scan(b"a", b"a").len(), 1);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let scanner = DiagonalScanner::new(2);
        let a = b"the quick brown fox jumps";
        let b = b"a quick brown dog jumps";
        assert_eq!(scanner.scan(a, b), scanner.scan(a, b));
    }

    #[test]
    fn test_swapping_inputs_mirrors_matches() {
        let scanner = DiagonalScanner::new(2);
        let a = b"abcabcxxab";
        let b = b"xxabcab";

        let mut forward: Vec<(usize, usize, usize)> = scanner
            .scan(a, b)
            .iter()
            .map(|m| (m.a_offset, m.b_offset, m.length))
            .collect();
        let mut backward: Vec<(usize, usize, usize)> = scanner
            .scan(b, a)
            .iter()
            .map(|m| (m.b_offset, m.a_offset, m.length))
            .collect();
        forward.sort();
        backward.sort();
        assert_eq!(forward, backward);
    }
}
