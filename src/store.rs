//! Storage collaborator for analysis records.
//!
//! [`RecordStore`] is the seam between the analyzer and persistence: find a
//! prior verdict by fingerprint, record a new one, count by verdict. The
//! SQLite implementation leans on the fingerprint primary key as the
//! authority under concurrent first-time submissions: a duplicate insert
//! returns the winner's record instead of erroring.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::models::AnalysisRecord;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up a previously recorded verdict by content fingerprint.
    async fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<AnalysisRecord>>;

    /// Insert a record unless one with the same fingerprint already exists.
    /// Returns the persisted record either way.
    async fn insert_if_absent(&self, record: AnalysisRecord) -> Result<AnalysisRecord>;

    /// Number of records with the given verdict.
    async fn count_where(&self, is_mutant: bool) -> Result<i64>;
}

/// SQLite-backed record store over the `dna_records` table.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<AnalysisRecord>> {
        let row = sqlx::query(
            "SELECT fingerprint, is_mutant, created_at FROM dna_records WHERE fingerprint = ?",
        )
        .bind(fingerprint)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| AnalysisRecord {
            fingerprint: row.get("fingerprint"),
            is_mutant: row.get("is_mutant"),
            created_at: row.get("created_at"),
        }))
    }

    async fn insert_if_absent(&self, record: AnalysisRecord) -> Result<AnalysisRecord> {
        sqlx::query(
            r#"
            INSERT INTO dna_records (fingerprint, is_mutant, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(fingerprint) DO NOTHING
            "#,
        )
        .bind(&record.fingerprint)
        .bind(record.is_mutant)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        // Read back: on conflict the concurrent winner's record stands.
        let persisted = self.find_by_fingerprint(&record.fingerprint).await?;
        persisted.ok_or_else(|| {
            anyhow::anyhow!("record missing after insert: {}", record.fingerprint)
        })
    }

    async fn count_where(&self, is_mutant: bool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dna_records WHERE is_mutant = ?")
            .bind(is_mutant)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
