//! Corpus-wide gram discovery: scan every file pair, register, log
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────┐   pairs (i < j)   ┌────────────────┐  RunMatch   ┌──────────────┐
//! │    Corpus    │ ────────────────▶ │ DiagonalScanner│ ──────────▶ │ GramRegistry │
//! └──────────────┘                   └────────────────┘             └──────┬───────┘
//!                                     (parallel workers)   Accepted/Merged  │
//!                                                                           ▼
//!                                                               FileOccurrenceLog x2
//! ```
//!
//! Pair scans are pure and independent, so with `jobs > 1` they run on
//! scoped worker threads that claim pair indices from a shared cursor.
//! Pairs are scanned in windows of `jobs * PAIRS_PER_WORKER`; each window is
//! registered in pair order before the next one starts, so at most one
//! window of scan results is held in memory. The registry and logs have a
//! single writer and the output is identical for any worker count.
//!
//! Within a pair the longer file is `a` (ties: earlier file). The shorter
//! file's slice is what gets offered to the registry; both files log the
//! hit at their own offsets.

use crate::config::BingramConfig;
use crate::corpus::{ByteSequence, Corpus};
use crate::gram::Gram;
use crate::occurrence::FileOccurrenceLog;
use crate::registry::{GramRegistry, RegistryStats};
use crate::scanner::{DiagonalScanner, RunMatch};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Pairs scanned per worker before the window is registered
const PAIRS_PER_WORKER: usize = 16;

/// One unordered file pair, oriented for scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilePair {
    /// Index of the longer file (scanned as `a`)
    pub long: usize,
    /// Index of the shorter file (scanned as `b`, offered to the registry)
    pub short: usize,
}

/// Every unordered pair `(i, j)` with `i < j`, in that order
pub fn plan_pairs(sequences: &[ByteSequence]) -> Vec<FilePair> {
    let n = sequences.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let pair = if sequences[i].len() >= sequences[j].len() {
                FilePair { long: i, short: j }
            } else {
                FilePair { long: j, short: i }
            };
            pairs.push(pair);
        }
    }
    pairs
}

/// Counters for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub files: usize,
    pub pairs: usize,
    /// Alignments walked over all pairs
    pub diagonals: u64,
    pub candidates: u64,
    #[serde(flatten)]
    pub registry: RegistryStats,
    pub dropped_hits: u64,
}

/// Result of a run: the registry plus one occurrence log per file
#[derive(Debug)]
pub struct Analysis<'c> {
    corpus: &'c Corpus,
    registry: GramRegistry<'c>,
    logs: Vec<FileOccurrenceLog>,
    summary: ScanSummary,
}

impl<'c> Analysis<'c> {
    pub fn corpus(&self) -> &'c Corpus {
        self.corpus
    }

    pub fn registry(&self) -> &GramRegistry<'c> {
        &self.registry
    }

    /// Occurrence logs, parallel to `corpus().sequences()`
    pub fn logs(&self) -> &[FileOccurrenceLog] {
        &self.logs
    }

    pub fn log(&self, index: usize) -> Option<&FileOccurrenceLog> {
        self.logs.get(index)
    }

    pub fn summary(&self) -> ScanSummary {
        self.summary
    }
}

/// Drives the scanner over every pair and feeds the registry and logs
#[derive(Debug)]
pub struct GramEngine<'c> {
    corpus: &'c Corpus,
    scanner: DiagonalScanner,
    registry: GramRegistry<'c>,
    logs: Vec<FileOccurrenceLog>,
    jobs: usize,
    pairs: usize,
    diagonals: u64,
    candidates: u64,
}

impl<'c> GramEngine<'c> {
    /// Engine over `corpus`; the configuration is assumed validated
    pub fn new(corpus: &'c Corpus, config: &BingramConfig) -> Self {
        Self {
            corpus,
            scanner: DiagonalScanner::new(config.gramsize),
            registry: GramRegistry::new(config.bucket_depth, config.editdist),
            logs: (0..corpus.len())
                .map(|_| FileOccurrenceLog::new(config.file_hits))
                .collect(),
            jobs: config.jobs.max(1),
            pairs: 0,
            diagonals: 0,
            candidates: 0,
        }
    }

    /// Scan all pairs and return the finished analysis
    pub fn run(mut self) -> Analysis<'c> {
        let pairs = plan_pairs(self.corpus.sequences());
        tracing::debug!(
            files = self.corpus.len(),
            pairs = pairs.len(),
            jobs = self.jobs,
            "scanning pairs"
        );

        if self.jobs <= 1 || pairs.len() <= 1 {
            for &pair in &pairs {
                let matches = self.scan_pair(pair);
                self.register(pair, &matches);
            }
        } else {
            for window in pairs.chunks(self.jobs * PAIRS_PER_WORKER) {
                let results = self.scan_parallel(window);
                for (&pair, matches) in window.iter().zip(results) {
                    self.register(pair, &matches);
                }
            }
        }

        self.finish()
    }

    fn scan_pair(&self, pair: FilePair) -> Vec<RunMatch> {
        let sequences = self.corpus.sequences();
        self.scanner
            .scan(sequences[pair.long].bytes(), sequences[pair.short].bytes())
    }

    /// Scan one window of pairs on worker threads; results come back in
    /// pair order
    fn scan_parallel(&self, pairs: &[FilePair]) -> Vec<Vec<RunMatch>> {
        let cursor = AtomicUsize::new(0);
        let workers = self.jobs.min(pairs.len());

        let scanned = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let cursor = &cursor;
                    scope.spawn(move |_| {
                        let mut local = Vec::new();
                        loop {
                            let index = cursor.fetch_add(1, Ordering::Relaxed);
                            let Some(&pair) = pairs.get(index) else {
                                break;
                            };
                            local.push((index, self.scan_pair(pair)));
                        }
                        local
                    })
                })
                .collect();

            let mut scanned = Vec::with_capacity(pairs.len());
            for handle in handles {
                match handle.join() {
                    Ok(local) => scanned.extend(local),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            scanned
        })
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic));

        let mut results: Vec<Vec<RunMatch>> = vec![Vec::new(); pairs.len()];
        for (index, matches) in scanned {
            results[index] = matches;
        }
        results
    }

    /// Offer a pair's matches to the registry and log the registered ones
    fn register(&mut self, pair: FilePair, matches: &[RunMatch]) {
        let corpus: &'c Corpus = self.corpus;
        let long = &corpus.sequences()[pair.long];
        let short = &corpus.sequences()[pair.short];
        self.pairs += 1;
        self.diagonals += DiagonalScanner::diagonal_count(long.len(), short.len()) as u64;

        for m in matches {
            self.candidates += 1;
            let Some(candidate) = Gram::new(short, m.b_offset, m.length) else {
                continue;
            };
            let offer = self.registry.offer(candidate);
            if !offer.is_registered() {
                tracing::trace!(
                    file = short.id(),
                    diagonal = m.diagonal(),
                    ?offer,
                    "candidate not registered"
                );
                continue;
            }
            self.record(pair.long, m.a_offset, m.length);
            self.record(pair.short, m.b_offset, m.length);
        }
    }

    fn record(&mut self, file: usize, offset: usize, length: usize) {
        let log = &mut self.logs[file];
        if log.is_full() && log.dropped() == 0 {
            tracing::debug!(
                "occurrence log full for {}, further hits dropped",
                self.corpus.sequences()[file].id()
            );
        }
        log.record(offset, length);
    }

    fn finish(self) -> Analysis<'c> {
        let stats = self.registry.stats();
        let summary = ScanSummary {
            files: self.corpus.len(),
            pairs: self.pairs,
            diagonals: self.diagonals,
            candidates: self.candidates,
            registry: stats,
            dropped_hits: self.logs.iter().map(FileOccurrenceLog::dropped).sum(),
        };

        if stats.rejected_bucket_full > 0 {
            tracing::warn!(
                "{} distinct grams rejected by full registry buckets (check --depth)",
                stats.rejected_bucket_full
            );
        }
        if summary.dropped_hits > 0 {
            tracing::debug!(
                "{} hits dropped by full occurrence logs",
                summary.dropped_hits
            );
        }

        Analysis {
            corpus: self.corpus,
            registry: self.registry,
            logs: self.logs,
            summary,
        }
    }
}

/// Convenience wrapper: build an engine and run it
pub fn analyze<'c>(corpus: &'c Corpus, config: &BingramConfig) -> Analysis<'c> {
    GramEngine::new(corpus, config).run()
}
