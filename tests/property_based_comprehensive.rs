//! Property-based tests for the core pipeline
//!
//! Covers the diagonal scanner, the gram registry, occurrence logs and the
//! byte histogram with random inputs. Kept small enough to run as a quick
//! pre-commit gate.

use bingram::config::BingramConfig;
use bingram::corpus::{ByteSequence, Corpus};
use bingram::engine::analyze;
use bingram::gram::Gram;
use bingram::histogram::ByteHistogram;
use bingram::occurrence::FileOccurrenceLog;
use bingram::registry::GramRegistry;
use bingram::scanner::DiagonalScanner;
use proptest::prelude::*;

/// Small alphabet so that random inputs actually share runs
fn bytes(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..4, 0..max)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_scan_runs_are_real_and_long_enough(
        a in bytes(48),
        b in bytes(48),
        gramsize in 1usize..6,
    ) {
        let scanner = DiagonalScanner::new(gramsize);
        for m in scanner.scan(&a, &b) {
            prop_assert!(m.length >= gramsize);
            prop_assert!(m.a_offset + m.length <= a.len());
            prop_assert!(m.b_offset + m.length <= b.len());
            prop_assert_eq!(
                &a[m.a_offset..m.a_offset + m.length],
                &b[m.b_offset..m.b_offset + m.length]
            );
        }
    }

    #[test]
    fn prop_scan_runs_are_maximal(a in bytes(48), b in bytes(48)) {
        let scanner = DiagonalScanner::new(1);
        for m in scanner.scan(&a, &b) {
            if m.a_offset > 0 && m.b_offset > 0 {
                prop_assert_ne!(a[m.a_offset - 1], b[m.b_offset - 1]);
            }
            let end_a = m.a_offset + m.length;
            let end_b = m.b_offset + m.length;
            if end_a < a.len() && end_b < b.len() {
                prop_assert_ne!(a[end_a], b[end_b]);
            }
        }
    }

    #[test]
    fn prop_scan_symmetric(a in bytes(32), b in bytes(32), gramsize in 1usize..4) {
        let scanner = DiagonalScanner::new(gramsize);
        let mut forward: Vec<_> = scanner
            .scan(&a, &b)
            .into_iter()
            .map(|m| (m.a_offset, m.b_offset, m.length))
            .collect();
        let mut backward: Vec<_> = scanner
            .scan(&b, &a)
            .into_iter()
            .map(|m| (m.b_offset, m.a_offset, m.length))
            .collect();
        forward.sort_unstable();
        backward.sort_unstable();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn prop_scan_one_run_per_diagonal_start(a in bytes(40), b in bytes(40)) {
        // No two runs may start at the same cell
        let scanner = DiagonalScanner::new(1);
        let mut starts: Vec<_> = scanner
            .scan(&a, &b)
            .into_iter()
            .map(|m| (m.a_offset, m.b_offset))
            .collect();
        let total = starts.len();
        starts.sort_unstable();
        starts.dedup();
        prop_assert_eq!(starts.len(), total);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_registry_bounded_and_counted(
        files in prop::collection::vec(prop::collection::vec(0u8..4, 1..24), 1..6),
        offers in prop::collection::vec((0usize..6, 0usize..24, 1usize..6), 0..80),
        depth in 1usize..4,
        editdist in 0usize..3,
    ) {
        let sequences: Vec<ByteSequence> = files
            .into_iter()
            .enumerate()
            .map(|(i, bytes)| ByteSequence::new(format!("f{}", i), bytes))
            .collect();
        let mut registry = GramRegistry::new(depth, editdist);

        for (file, offset, length) in offers {
            let source = &sequences[file % sequences.len()];
            if let Some(gram) = Gram::new(source, offset, length) {
                registry.offer(gram);
            }
        }

        let stats = registry.stats();
        prop_assert_eq!(stats.accepted as usize, registry.len());
        for lead in 0..=255u8 {
            prop_assert!(registry.bucket(lead).len() <= depth);
        }
        let total: u64 = registry.iter().map(|g| g.count() as u64).sum();
        prop_assert_eq!(total, stats.accepted + stats.merged);
        for gram in registry.iter() {
            prop_assert_eq!(gram.bytes()[0], gram.lead());
        }
    }

    #[test]
    fn prop_occurrence_log_never_exceeds_capacity(
        capacity in 1usize..16,
        hits in prop::collection::vec((0usize..100, 1usize..10), 0..64),
    ) {
        let mut log = FileOccurrenceLog::new(capacity);
        for &(offset, length) in &hits {
            log.record(offset, length);
        }
        prop_assert!(log.len() <= capacity);
        prop_assert_eq!(log.len() as u64 + log.dropped(), hits.len() as u64);
        // Earliest hits are the ones kept
        for (kept, &(offset, length)) in log.hits().iter().zip(&hits) {
            prop_assert_eq!(kept.offset, offset);
            prop_assert_eq!(kept.length, length);
        }
    }

    #[test]
    fn prop_histogram_total_matches_length(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let histogram = ByteHistogram::from_bytes(&data);
        prop_assert_eq!(histogram.total(), data.len() as u64);
        let top = histogram.top(256);
        for pair in top.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_analysis_within_bounds(
        files in prop::collection::vec(prop::collection::vec(0u8..3, 1..40), 1..5),
        gramsize in 1usize..5,
        file_hits in 1usize..8,
    ) {
        let corpus = Corpus::from_sequences(
            files
                .into_iter()
                .enumerate()
                .map(|(i, bytes)| ByteSequence::new(format!("f{}", i), bytes))
                .collect(),
        );
        let config = BingramConfig {
            gramsize,
            file_hits,
            bucket_depth: 4,
            ..BingramConfig::default()
        };
        let analysis = analyze(&corpus, &config);

        for gram in analysis.registry().iter() {
            prop_assert!(gram.length() >= gramsize);
        }
        for (sequence, log) in corpus.sequences().iter().zip(analysis.logs()) {
            prop_assert!(log.len() <= file_hits);
            for hit in log.hits() {
                prop_assert!(hit.offset + hit.length <= sequence.len());
            }
        }
        let summary = analysis.summary();
        prop_assert_eq!(summary.registry.offered(), summary.candidates);
    }
}
