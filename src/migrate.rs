use anyhow::Result;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(&config.db.path).await?;

    // One record per distinct matrix fingerprint. The primary key is the
    // uniqueness authority under concurrent first-time submissions.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dna_records (
            fingerprint TEXT PRIMARY KEY,
            is_mutant INTEGER NOT NULL,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_dna_records_is_mutant ON dna_records(is_mutant)",
    )
    .execute(&pool)
    .await?;

    pool.close().await;
    Ok(())
}
