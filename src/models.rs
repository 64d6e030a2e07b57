//! Core data types for recorded verdicts and aggregate statistics.

use serde::Serialize;

/// Persisted verdict for one distinct DNA matrix, keyed by content
/// fingerprint. Written once on first analysis, never updated.
#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    pub fingerprint: String,
    pub is_mutant: bool,
    /// Unix seconds at first analysis.
    pub created_at: i64,
}

/// Aggregate view over all analysis records. Recomputed from the store on
/// every query; never kept as in-process counters.
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub count_mutant_dna: i64,
    pub count_human_dna: i64,
    pub ratio: f64,
}
