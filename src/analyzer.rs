//! Deduplicating analyzer: the single entry point for classifying DNA
//! matrices and reading aggregate statistics.
//!
//! Two lookup tiers sit in front of the detector: an in-process result map
//! keyed by normalized matrix content, and the authoritative record store
//! keyed by content fingerprint. Identical content is scanned at most once;
//! every later submission is answered from a prior verdict. Only storage
//! failures surface as errors; malformed DNA flows through the detector's
//! human verdict.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::debug;

use crate::detector;
use crate::fingerprint;
use crate::models::{AnalysisRecord, Stats};
use crate::store::RecordStore;

pub struct Analyzer {
    store: Arc<dyn RecordStore>,
    // L1: verdicts keyed by normalized matrix content, so in-process repeats
    // skip the hash and the store round-trip entirely.
    cache: RwLock<HashMap<String, bool>>,
}

impl Analyzer {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Classify a DNA matrix, serving repeats from prior records.
    pub async fn analyze(&self, dna: &[String]) -> Result<bool> {
        let rows = fingerprint::normalize(dna);
        let cache_key = rows.join("\n");

        if let Some(&verdict) = self.cache.read().await.get(&cache_key) {
            debug!("memory cache hit");
            return Ok(verdict);
        }

        let fp = fingerprint::fingerprint(&rows);

        if let Some(record) = self.store.find_by_fingerprint(&fp).await? {
            debug!(fingerprint = %fp, "reusing stored verdict");
            self.cache.write().await.insert(cache_key, record.is_mutant);
            return Ok(record.is_mutant);
        }

        let verdict = detector::is_mutant(&rows);
        let record = AnalysisRecord {
            fingerprint: fp,
            is_mutant: verdict,
            created_at: chrono::Utc::now().timestamp(),
        };

        // On a lost race the store hands back the concurrent winner's record.
        let persisted = self.store.insert_if_absent(record).await?;
        self.cache.write().await.insert(cache_key, persisted.is_mutant);
        Ok(persisted.is_mutant)
    }

    /// Aggregate counts and ratio, recomputed from the store on every call.
    pub async fn stats(&self) -> Result<Stats> {
        let count_mutant_dna = self.store.count_where(true).await?;
        let count_human_dna = self.store.count_where(false).await?;
        let ratio = if count_human_dna > 0 {
            count_mutant_dna as f64 / count_human_dna as f64
        } else {
            0.0
        };
        Ok(Stats {
            count_mutant_dna,
            count_human_dna,
            ratio,
        })
    }
}
