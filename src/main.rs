#![forbid(unsafe_code)]
//! # Word Association CLI
//!
//! Command-line front end for the `word_assoc` crate. It reads the partial
//! count lines produced by the upstream counting stages, loads the
//! corpus-wide `L`/`F` totals from a counter file, merges the counts per
//! (word, feature) pair, and writes one scored record per pair.
//!
//! ## Example
//! ```bash
//! cargo run --release -- counts/ --counters counters.txt --export-format txt
//! ```
//!
//! See `--help` for all available options.

use clap::Parser;
use env_logger;
use log::{debug, error};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process;
use word_assoc::{
    AssocReport, ExportFormat, analyze_path, load_corpus_totals, print_incomplete_pairs,
    write_records,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// File or directory with partial count lines to merge
    input: String,

    /// Counter file holding the corpus-wide L and F totals
    #[arg(long)]
    counters: String,

    /// Write results to this file instead of stdout
    #[arg(long)]
    output: Option<String>,

    /// Output format for the scored pairs (txt, csv, json)
    #[arg(long, default_value = "txt")]
    export_format: ExportFormat,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // The totals gate everything: no pair can be scored without them.
    let totals = match load_corpus_totals(Path::new(&cli.counters)) {
        Ok(totals) => totals,
        Err(e) => {
            error!("Error: {}", e);
            process::exit(1);
        }
    };
    debug!("Corpus totals loaded: L={} F={}", totals.pairs, totals.features);

    match analyze_path(Path::new(&cli.input), &totals) {
        Ok(report) => {
            debug!(
                "{} lines read, {} skipped, {} pairs scored, {} incomplete",
                report.lines_read,
                report.lines_skipped,
                report.records.len(),
                report.incomplete.len()
            );
            // Incomplete pairs are diagnostics, not failures.
            if !report.incomplete.is_empty() {
                print_incomplete_pairs(&report.incomplete);
            }
            if let Err(e) = write_output(&cli, &report) {
                error!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn write_output(cli: &Cli, report: &AssocReport) -> Result<(), String> {
    match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| format!("Create {path} failed: {e}"))?;
            let mut out = BufWriter::new(file);
            write_records(&mut out, &report.records, cli.export_format)?;
            out.flush().map_err(|e| format!("Write {path} failed: {e}"))
        }
        None => {
            let stdout = io::stdout();
            write_records(stdout.lock(), &report.records, cli.export_format)
        }
    }
}
