//! Aggregate statistics report.
//!
//! Queries the record store for mutant/human counts and prints a summary.
//! Counts are recomputed from the database on every call, so the numbers
//! stay correct under concurrent writers and across processes.

use std::sync::Arc;

use anyhow::Result;
use chrono::DateTime;

use crate::analyzer::Analyzer;
use crate::config::Config;
use crate::db;
use crate::store::SqliteStore;

/// Run the stats command: query the database and print a summary.
pub async fn run_stats(config: &Config, json: bool) -> Result<()> {
    let pool = db::connect(&config.db.path).await?;
    let analyzer = Analyzer::new(Arc::new(SqliteStore::new(pool.clone())));

    let stats = analyzer.stats().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        pool.close().await;
        return Ok(());
    }

    let last_analyzed: Option<i64> = sqlx::query_scalar("SELECT MAX(created_at) FROM dna_records")
        .fetch_one(&pool)
        .await?;

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("DNA Screen — Analysis Stats");
    println!("===========================");
    println!();
    println!("  Database:  {}", config.db.path.display());
    println!("  Size:      {}", format_bytes(db_size));
    println!();
    println!("  Mutant:    {}", stats.count_mutant_dna);
    println!("  Human:     {}", stats.count_human_dna);
    println!("  Ratio:     {:.2}", stats.ratio);
    if let Some(dt) = last_analyzed.and_then(|ts| DateTime::from_timestamp(ts, 0)) {
        println!();
        println!("  Last analysis: {}", dt.to_rfc3339());
    }

    pool.close().await;
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
