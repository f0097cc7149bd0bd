#![no_main]

use bingram::config::BingramConfig;
use bingram::corpus::{ByteSequence, Corpus};
use bingram::engine::analyze;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the parameters, the rest is split into two files
    let Some((&params, rest)) = data.split_first() else {
        return;
    };
    let (a, b) = rest.split_at(rest.len() / 2);
    if a.is_empty() || b.is_empty() {
        return;
    }

    let config = BingramConfig {
        gramsize: (params & 0x07) as usize + 1,
        editdist: ((params >> 3) & 0x03) as usize,
        bucket_depth: 8,
        file_hits: 16,
        ..BingramConfig::default()
    };
    let corpus = Corpus::from_sequences(vec![
        ByteSequence::new("a", a.to_vec()),
        ByteSequence::new("b", b.to_vec()),
    ]);

    // Must not panic, and every registered gram stays inside its source
    let analysis = analyze(&corpus, &config);
    for gram in analysis.registry().iter() {
        assert!(gram.offset() + gram.length() <= gram.source().len());
        assert!(gram.length() >= config.gramsize);
    }
});
