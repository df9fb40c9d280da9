use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Corpus-wide normalization totals, read once before any pair is scored.
///
/// `pairs` is the total number of pair occurrences in the corpus (the `L`
/// counter); `features` is the total number of single-feature occurrences
/// (the `F` counter). Immutable after loading; every scoring call borrows it
/// read-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorpusTotals {
    pub pairs: f64,
    pub features: f64,
}

/// Scans counter lines for the `L` and `F` totals.
///
/// A line sets a total only if its first whitespace-separated token is
/// exactly `L` or `F` and its second parses as a number; the last such line
/// wins. Every other line belongs to some other stage's counters and is
/// ignored. Ending the scan with either total unset is a configuration
/// error: nothing downstream can be normalized without both.
pub fn read_corpus_totals<R: BufRead>(reader: R) -> Result<CorpusTotals, String> {
    let mut pairs = None;
    let mut features = None;
    for line in reader.lines() {
        let line = line.map_err(|e| format!("Read counter file failed: {e}"))?;
        let mut tokens = line.split_whitespace();
        let name = tokens.next();
        let value = tokens.next().and_then(|v| v.parse::<f64>().ok());
        match (name, value) {
            (Some("L"), Some(value)) => pairs = Some(value),
            (Some("F"), Some(value)) => features = Some(value),
            _ => {}
        }
    }
    match (pairs, features) {
        (Some(pairs), Some(features)) => Ok(CorpusTotals { pairs, features }),
        (pairs, features) => Err(format!(
            "Total counters not found (L {}, F {})",
            presence(pairs),
            presence(features)
        )),
    }
}

/// Loads the totals from a counter file on disk.
pub fn load_corpus_totals(path: &Path) -> Result<CorpusTotals, String> {
    let file = File::open(path)
        .map_err(|e| format!("Open counter file {} failed: {e}", path.display()))?;
    read_corpus_totals(BufReader::new(file))
}

fn presence(total: Option<f64>) -> &'static str {
    if total.is_some() { "present" } else { "missing" }
}
