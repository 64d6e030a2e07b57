use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Largest accepted matrix dimension. Enforced at the command boundary,
    /// not inside the detector.
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
        }
    }
}

fn default_max_size() -> usize {
    1000
}

impl Config {
    /// Fallback for commands that work without a config file on disk.
    pub fn minimal() -> Self {
        Self {
            db: DbConfig {
                path: PathBuf::from("./data/dna.sqlite"),
            },
            analysis: AnalysisConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.analysis.max_size < 4 {
        anyhow::bail!("analysis.max_size must be >= 4");
    }

    Ok(config)
}
