//! `dna analyze` and `dna check` command orchestration.
//!
//! Reads a matrix from a file or stdin (plain rows or a JSON array of
//! strings), applies the boundary size limit, and runs it through the
//! deduplicating analyzer (`analyze`) or the bare detector (`check`).
//! Oversize input is a reportable error here, distinct from the detector's
//! malformed-input collapse to a human verdict.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::analyzer::Analyzer;
use crate::config::Config;
use crate::db;
use crate::detector;
use crate::fingerprint;
use crate::store::SqliteStore;

/// Analysis response shape for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub verdict: String,
    pub is_mutant: bool,
    pub fingerprint: String,
}

/// Run a matrix through the full pipeline: dedup lookup, detection on a
/// miss, verdict recorded.
pub async fn run_analyze(config: &Config, input: &Path, json: bool) -> Result<()> {
    let dna = read_matrix(input, config.analysis.max_size)?;

    let pool = db::connect(&config.db.path).await?;
    let store = Arc::new(SqliteStore::new(pool.clone()));
    let analyzer = Analyzer::new(store);

    let is_mutant = analyzer.analyze(&dna).await?;

    if json {
        let rows = fingerprint::normalize(&dna);
        let response = AnalyzeResponse {
            verdict: verdict_label(is_mutant).to_string(),
            is_mutant,
            fingerprint: fingerprint::fingerprint(&rows),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", verdict_label(is_mutant));
    }

    pool.close().await;
    Ok(())
}

/// Detector-only path: no fingerprint, no database, no record.
pub fn run_check(input: &Path, max_size: usize) -> Result<()> {
    let dna = read_matrix(input, max_size)?;
    let rows = fingerprint::normalize(&dna);
    println!("{}", verdict_label(detector::is_mutant(&rows)));
    Ok(())
}

fn verdict_label(is_mutant: bool) -> &'static str {
    if is_mutant {
        "mutant"
    } else {
        "human"
    }
}

/// Read a matrix from a file or stdin (`-`). Accepts one row per line, or a
/// JSON array of row strings. Enforces the configured maximum dimension;
/// everything else is the detector's business.
fn read_matrix(input: &Path, max_size: usize) -> Result<Vec<String>> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read matrix from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read matrix file: {}", input.display()))?
    };

    let dna: Vec<String> = if content.trim_start().starts_with('[') {
        serde_json::from_str(content.trim()).context("Failed to parse JSON matrix")?
    } else {
        content
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    };

    if dna.len() > max_size {
        bail!(
            "matrix has {} rows, above the configured maximum of {}",
            dna.len(),
            max_size
        );
    }
    if let Some(row) = dna.iter().find(|row| row.len() > max_size) {
        bail!(
            "matrix row has {} bases, above the configured maximum of {}",
            row.len(),
            max_size
        );
    }

    Ok(dna)
}
