//! Human-readable text output (default format)

use crate::report::Report;

/// Histogram rows are printed this many counters per line
const HISTOGRAM_ROW: usize = 16;

/// Render a report as plain text
pub fn render(report: &Report) -> String {
    let mut out = String::new();
    let summary = &report.summary.scan;

    out.push_str(&format!(
        "{} distinct grams across {} files ({} pairs, {} candidates)\n",
        report.grams.len(),
        summary.files,
        summary.pairs,
        summary.candidates
    ));
    for gram in &report.grams {
        out.push_str(&format!(
            "  count={:<5} len={:<5} {}@{}  {}\n",
            gram.count,
            gram.length,
            gram.source.as_deref().unwrap_or("-"),
            gram.offset,
            gram.bytes
        ));
    }

    for file in &report.files {
        out.push_str(&format!(
            "\n{} ({} bytes, {} hits",
            file.name, file.size, file.hits
        ));
        if file.dropped > 0 {
            out.push_str(&format!(", {} dropped", file.dropped));
        }
        out.push_str(")\n");

        for hit in &file.grams {
            out.push_str(&format!(
                "  @{:<6} len={:<5} {}\n",
                hit.offset, hit.length, hit.bytes
            ));
        }

        if let Some(histogram) = &file.histogram {
            out.push_str("  histogram:\n");
            for (row, chunk) in histogram.counts().chunks(HISTOGRAM_ROW).enumerate() {
                let counts: Vec<String> = chunk.iter().map(|c| c.to_string()).collect();
                out.push_str(&format!(
                    "    {:02X}: {}\n",
                    row * HISTOGRAM_ROW,
                    counts.join(" ")
                ));
            }
        }
    }

    out.push_str(&format!(
        "\naccepted={} merged={} rejected_overlap={} rejected_bucket_full={} dropped_hits={}\n",
        summary.registry.accepted,
        summary.registry.merged,
        summary.registry.rejected_overlap,
        summary.registry.rejected_bucket_full,
        summary.dropped_hits
    ));

    if let Some(top) = &report.summary.top_bytes {
        let entries: Vec<String> = top
            .iter()
            .map(|b| format!("{}:{}", b.byte, b.count))
            .collect();
        out.push_str(&format!("most common bytes: {}\n", entries.join(" ")));
    }

    out
}
