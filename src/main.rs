//! # DNA Screen CLI (`dna`)
//!
//! The `dna` binary is the request-handling surface in front of the
//! screening core. It covers database initialization, matrix analysis,
//! detector-only checks, and aggregate statistics.
//!
//! ## Usage
//!
//! ```bash
//! dna --config ./config/dna.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dna init` | Create the SQLite database and run schema migrations |
//! | `dna analyze <input>` | Classify a matrix, answering repeats from stored records |
//! | `dna check <input>` | Classify a matrix without touching the database |
//! | `dna stats` | Show mutant/human counts and their ratio |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! dna init --config ./config/dna.toml
//!
//! # Classify a matrix file (one row per line, or a JSON array)
//! dna analyze sample.txt
//! dna analyze sample.json --json
//!
//! # Read the matrix from stdin
//! printf 'AAAA\nCCCC\nTTAT\nAGAC\n' | dna analyze -
//!
//! # Aggregate statistics
//! dna stats --json
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use dna_screen::{config, migrate, screen, stats};

/// DNA Screen CLI — content-addressed mutant detection over DNA matrices.
#[derive(Parser)]
#[command(
    name = "dna",
    about = "DNA Screen — content-addressed mutant detection over DNA matrices",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/dna.toml`. Database and analysis settings are
    /// read from this file.
    #[arg(long, global = true, default_value = "./config/dna.toml")]
    config: PathBuf,

    /// Enable debug logging on stderr (`RUST_LOG` refines the filter).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the `dna_records` table.
    /// Idempotent — running it multiple times is safe.
    Init,

    /// Analyze a DNA matrix and record the verdict.
    ///
    /// Reads the matrix from a file (one row per line, or a JSON array of
    /// row strings; `-` reads stdin). Repeated submissions of identical
    /// content are answered from the stored record without re-scanning.
    Analyze {
        /// Matrix input file, or `-` for stdin.
        input: PathBuf,

        /// Print the verdict and fingerprint as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Classify a matrix without touching the database.
    ///
    /// Runs the detector only: no fingerprint, no record, no dedup.
    /// Useful for trying matrices before committing them to the store.
    Check {
        /// Matrix input file, or `-` for stdin.
        input: PathBuf,
    },

    /// Show aggregate analysis statistics.
    ///
    /// Mutant and human record counts with their ratio, recomputed from
    /// the database on every call.
    Stats {
        /// Print the statistics as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Initialize tracing subscriber for debug output.
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Init => {
            let cfg = config::load_config(&cli.config)?;
            migrate::run_migrations(&cfg).await?;
            println!("database initialized at {}", cfg.db.path.display());
        }
        Commands::Analyze { input, json } => {
            let cfg = config::load_config(&cli.config)?;
            screen::run_analyze(&cfg, &input, json).await?;
        }
        Commands::Check { input } => {
            // check works without a config file on disk
            let cfg =
                config::load_config(&cli.config).unwrap_or_else(|_| config::Config::minimal());
            screen::run_check(&input, cfg.analysis.max_size)?;
        }
        Commands::Stats { json } => {
            let cfg = config::load_config(&cli.config)?;
            stats::run_stats(&cfg, json).await?;
        }
    }

    Ok(())
}
