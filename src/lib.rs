//! bingram - find common byte sequences (grams) across binary files
//!
//! This library provides the matching-and-deduplication engine behind the
//! `bingram` command: a pairwise diagonal scanner that finds every maximal
//! run of equal bytes between two files, a bounded registry that merges
//! recurring runs across the whole corpus, and per-file occurrence logs,
//! plus the collection and reporting around them.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod csv_output;
pub mod engine;
pub mod error;
pub mod gram;
pub mod histogram;
pub mod json_output;
pub mod occurrence;
pub mod registry;
pub mod report;
pub mod scanner;
pub mod text_output;
