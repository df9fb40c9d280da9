//! Corpus-wide word-association statistics.
//!
//! This crate is the join-and-aggregate stage of a word-association
//! pipeline. Earlier stages count, for every ordered (word, feature) pair,
//! the joint occurrences and the marginal occurrences of each side, and
//! write them as 4-field text lines (`<word> <feature> lf=<n> l=<n>` or
//! `… f=<n>`) together with a counter file holding the corpus-wide totals
//! `L` (all pair occurrences) and `F` (all single-feature occurrences).
//! This stage merges the partial counts per pair and derives four
//! collocation measures: raw joint frequency, conditional probability,
//! pointwise mutual information, and a t-test significance score.
//!
//! The totals are loaded once before any line is parsed; parsing and
//! per-pair scoring run in parallel, with a grouping pass in between that
//! hands every pair's complete set of counts to exactly one scoring call.

pub mod export;
pub mod records;
pub mod stats;
pub mod totals;

pub use export::{ExportFormat, format_assoc_line, write_records};
pub use records::{FeaturePair, PartialCount, PartialRecord, parse_line};
pub use stats::{AssociationScores, PairCounts, fold_counts, score_pair};
pub use totals::{CorpusTotals, load_corpus_totals, read_corpus_totals};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::error;
use rayon::prelude::*;
use walkdir::WalkDir;

/// What one run produced: the scored pairs plus everything that did not
/// make it into the output.
#[derive(Debug, Clone, PartialEq)]
pub struct AssocReport {
    /// Scored pairs, sorted by (word, feature).
    pub records: Vec<(FeaturePair, AssociationScores)>,
    /// Input lines seen.
    pub lines_read: usize,
    /// Lines dropped by the parser as upstream noise.
    pub lines_skipped: usize,
    /// Pairs whose merged counts were incomplete, with whatever they did
    /// accumulate; these produce no output record. Sorted by pair.
    pub incomplete: Vec<(FeaturePair, PairCounts)>,
}

/// Collects the input files under `path`: the path itself if it is a file,
/// otherwise every regular file below it (upstream stages write a directory
/// of `part-r-*` shards). Sorted for reproducible traversal.
pub fn collect_files(path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// Merges and scores every pair found in `texts`.
///
/// Parsing runs in parallel over all lines of all texts. The grouping pass
/// then collects every tagged count under its pair before any scoring
/// starts, so a pair's group is complete when scoring sees it and no group
/// is ever split across two scoring calls. Scoring runs in parallel over
/// pairs, each call reading the shared totals and nothing else. How the
/// input lines were distributed across `texts` has no effect on the result.
pub fn associate_corpus(texts: &[String], totals: &CorpusTotals) -> AssocReport {
    let parsed: Vec<Option<PartialRecord>> = texts
        .par_iter()
        .flat_map(|text| text.par_lines())
        .map(parse_line)
        .collect();
    let lines_read = parsed.len();
    let records: Vec<PartialRecord> = parsed.into_iter().flatten().collect();
    let lines_skipped = lines_read - records.len();

    let mut groups: HashMap<FeaturePair, Vec<PartialCount>> = HashMap::new();
    for record in records {
        groups.entry(record.pair).or_default().extend(record.counts);
    }

    let scored: Vec<(FeaturePair, Result<AssociationScores, PairCounts>)> = groups
        .into_par_iter()
        .map(|(pair, counts)| {
            let folded = fold_counts(&counts);
            let outcome = score_pair(&folded, totals).ok_or(folded);
            (pair, outcome)
        })
        .collect();

    let mut report = AssocReport {
        records: Vec::new(),
        lines_read,
        lines_skipped,
        incomplete: Vec::new(),
    };
    for (pair, outcome) in scored {
        match outcome {
            Ok(scores) => report.records.push((pair, scores)),
            Err(counts) => report.incomplete.push((pair, counts)),
        }
    }
    report.records.sort_by(|a, b| a.0.cmp(&b.0));
    report.incomplete.sort_by(|a, b| a.0.cmp(&b.0));
    report
}

/// Reads every input file under `path` and runs the merge.
pub fn analyze_path(path: &Path, totals: &CorpusTotals) -> Result<AssocReport, String> {
    let files = collect_files(path);
    if files.is_empty() {
        return Err(format!("No input files found under {}", path.display()));
    }
    let texts = files
        .iter()
        .map(|file| {
            fs::read_to_string(file).map_err(|e| format!("Read {} failed: {e}", file.display()))
        })
        .collect::<Result<Vec<String>, String>>()?;
    Ok(associate_corpus(&texts, totals))
}

/// Logs one diagnostic per incomplete pair with the counts it accumulated.
pub fn print_incomplete_pairs(incomplete: &[(FeaturePair, PairCounts)]) {
    for (pair, counts) in incomplete {
        error!(
            "{pair}: incomplete counts l={} f={} lf={}",
            counts.left, counts.right, counts.joint
        );
    }
}
