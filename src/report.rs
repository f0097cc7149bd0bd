//! Report model built once from a finished analysis
//!
//! Renderers (JSON, CSV, text) all consume this tree; none of them reach
//! back into the registry or the corpus.

use crate::config::BingramConfig;
use crate::engine::{Analysis, ScanSummary};
use crate::gram::Gram;
use crate::histogram::ByteHistogram;
use serde::Serialize;

/// A gram with its bytes rendered as uppercase hex
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GramRecord {
    pub bytes: String,
    /// File holding the representative occurrence (registry grams only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub offset: usize,
    pub length: usize,
    pub count: u32,
}

impl GramRecord {
    fn from_gram(gram: &Gram<'_>) -> Self {
        Self {
            bytes: gram.to_hex(),
            source: Some(gram.source().id().to_string()),
            offset: gram.offset(),
            length: gram.length(),
            count: gram.count(),
        }
    }
}

/// One file that took part in at least one registered gram
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub name: String,
    pub size: usize,
    pub hits: usize,
    pub dropped: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<ByteHistogram>,
    pub grams: Vec<GramRecord>,
}

/// A byte value and how often it occurs across the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ByteCount {
    /// Byte value as two hex digits
    pub byte: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    #[serde(flatten)]
    pub scan: ScanSummary,
    /// Most common bytes over all files (histogram mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_bytes: Option<Vec<ByteCount>>,
}

/// Complete report: distinct grams, per-file hits, and totals
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub grams: Vec<GramRecord>,
    pub files: Vec<FileRecord>,
    pub summary: ReportSummary,
}

impl Report {
    /// Walk the registry (bucket, then slot) and the logs (file order)
    pub fn build(analysis: &Analysis<'_>, config: &BingramConfig) -> Self {
        let grams = analysis
            .registry()
            .iter()
            .map(GramRecord::from_gram)
            .collect();

        let sequences = analysis.corpus().sequences();
        let files = sequences
            .iter()
            .zip(analysis.logs())
            .filter(|(_, log)| !log.is_empty())
            .map(|(sequence, log)| FileRecord {
                name: sequence.id().to_string(),
                size: sequence.len(),
                hits: log.len(),
                dropped: log.dropped(),
                histogram: sequence.histogram().cloned(),
                grams: log
                    .hits()
                    .iter()
                    .map(|hit| GramRecord {
                        bytes: hex::encode_upper(hit.slice(sequence.bytes())),
                        source: None,
                        offset: hit.offset,
                        length: hit.length,
                        count: 1,
                    })
                    .collect(),
            })
            .collect();

        let top_bytes = config.histogram.then(|| {
            let mut total = ByteHistogram::new();
            for histogram in sequences.iter().filter_map(|s| s.histogram()) {
                total.merge(histogram);
            }
            total
                .top(config.top_bytes)
                .into_iter()
                .map(|(byte, count)| ByteCount {
                    byte: format!("{:02X}", byte),
                    count,
                })
                .collect()
        });

        Self {
            grams,
            files,
            summary: ReportSummary {
                scan: analysis.summary(),
                top_bytes,
            },
        }
    }
}
