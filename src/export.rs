use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::records::FeaturePair;
use crate::stats::AssociationScores;

/// Output format for the scored pairs.
///
/// `Txt` is the tab-separated record the downstream pipeline stage consumes;
/// CSV and JSON carry the same fields for ad-hoc inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Txt,
    Csv,
    Json,
}

#[derive(Serialize)]
struct AssocRow<'a> {
    word: &'a str,
    feature: &'a str,
    assoc_freq: f64,
    assoc_prob: f64,
    #[serde(rename = "assoc_PMI")]
    assoc_pmi: f64,
    assoc_t_test: f64,
}

impl<'a> AssocRow<'a> {
    fn new(pair: &'a FeaturePair, scores: &AssociationScores) -> Self {
        AssocRow {
            word: &pair.word,
            feature: &pair.feature,
            assoc_freq: scores.assoc_freq,
            assoc_prob: scores.assoc_prob,
            assoc_pmi: scores.assoc_pmi,
            assoc_t_test: scores.assoc_t_test,
        }
    }
}

/// Formats one scored pair as the tab-separated pipeline record:
/// `<word> <feature>\tassoc_freq=<v> assoc_prob=<v> assoc_PMI=<v> assoc_t_test=<v>`.
pub fn format_assoc_line(pair: &FeaturePair, scores: &AssociationScores) -> String {
    format!(
        "{pair}\tassoc_freq={} assoc_prob={} assoc_PMI={} assoc_t_test={}",
        scores.assoc_freq, scores.assoc_prob, scores.assoc_pmi, scores.assoc_t_test
    )
}

/// Writes every scored pair to `out` in the requested format.
pub fn write_records<W: Write>(
    out: W,
    records: &[(FeaturePair, AssociationScores)],
    format: ExportFormat,
) -> Result<(), String> {
    match format {
        ExportFormat::Txt => write_txt(out, records),
        ExportFormat::Csv => write_csv(out, records),
        ExportFormat::Json => write_json(out, records),
    }
}

fn write_txt<W: Write>(
    mut out: W,
    records: &[(FeaturePair, AssociationScores)],
) -> Result<(), String> {
    for (pair, scores) in records {
        writeln!(out, "{}", format_assoc_line(pair, scores))
            .map_err(|e| format!("Write results failed: {e}"))?;
    }
    Ok(())
}

fn write_csv<W: Write>(
    out: W,
    records: &[(FeaturePair, AssociationScores)],
) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(out);
    for (pair, scores) in records {
        writer
            .serialize(AssocRow::new(pair, scores))
            .map_err(|e| format!("Write CSV failed: {e}"))?;
    }
    writer.flush().map_err(|e| format!("Write CSV failed: {e}"))
}

fn write_json<W: Write>(
    mut out: W,
    records: &[(FeaturePair, AssociationScores)],
) -> Result<(), String> {
    let rows: Vec<AssocRow> = records
        .iter()
        .map(|(pair, scores)| AssocRow::new(pair, scores))
        .collect();
    serde_json::to_writer_pretty(&mut out, &rows)
        .map_err(|e| format!("Write JSON failed: {e}"))?;
    writeln!(out).map_err(|e| format!("Write JSON failed: {e}"))
}
