//! CSV output format for gram reports
//!
//! One row per registry gram (`scope = gram`) followed by one row per file
//! hit (`scope = hit`), for spreadsheet analysis and machine parsing.

use crate::report::{GramRecord, Report};

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput<'r> {
    report: &'r Report,
}

impl<'r> CsvOutput<'r> {
    pub fn new(report: &'r Report) -> Self {
        Self { report }
    }

    fn header() -> &'static str {
        "scope,file,offset,length,count,bytes"
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_row(scope: &str, file: &str, gram: &GramRecord) -> String {
        [
            scope.to_string(),
            Self::escape_field(file),
            gram.offset.to_string(),
            gram.length.to_string(),
            gram.count.to_string(),
            gram.bytes.clone(),
        ]
        .join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(Self::header());
        output.push('\n');

        for gram in &self.report.grams {
            let file = gram.source.as_deref().unwrap_or("");
            output.push_str(&Self::format_row("gram", file, gram));
            output.push('\n');
        }

        for file in &self.report.files {
            for gram in &file.grams {
                output.push_str(&Self::format_row("hit", &file.name, gram));
                output.push('\n');
            }
        }

        output
    }
}
