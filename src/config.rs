use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable that overrides the `--config-path` default.
pub const CONFIG_ENV: &str = "RECALL_SWEEP_CONFIG";

/// Ranker evaluation configuration (JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub ranker: RankerConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Which ranker to build and how to tune it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RankerConfig {
    /// SQLite FTS5 BM25 over the store's full-text index
    Bm25 {
        #[serde(default)]
        min_score: f32,
    },
    /// In-memory TF-IDF cosine similarity
    Tfidf {
        #[serde(default = "default_true")]
        sublinear_tf: bool,
        #[serde(default = "default_true")]
        stop_words: bool,
    },
}

impl RankerConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            RankerConfig::Bm25 { .. } => "bm25",
            RankerConfig::Tfidf { .. } => "tfidf",
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load the ranker configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&config_str)
            .with_context(|| format!("Failed to parse config JSON: {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if let RankerConfig::Bm25 { min_score } = self.ranker {
            if !(0.0..=1.0).contains(&min_score) {
                anyhow::bail!("ranker.min_score must be between 0.0 and 1.0");
            }
        }

        if self.log_level.trim().parse::<log::LevelFilter>().is_err() {
            anyhow::bail!(
                "log_level must be one of off, error, warn, info, debug, trace (got {})",
                self.log_level
            );
        }

        Ok(())
    }

    /// Parsed log level
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.trim().parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(temp_dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = temp_dir.path().join("ranker.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_config_load_bm25() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            r#"{"ranker": {"type": "bm25", "min_score": 0.25}, "log_level": "debug"}"#,
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.ranker, RankerConfig::Bm25 { min_score: 0.25 });
        assert_eq!(config.ranker.kind(), "bm25");
        assert_eq!(config.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_config_tfidf_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, r#"{"ranker": {"type": "tfidf"}}"#);
        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.ranker,
            RankerConfig::Tfidf { sublinear_tf: true, stop_words: true }
        );
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_unknown_ranker() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, r#"{"ranker": {"type": "neural"}}"#);
        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("parse config JSON"));
    }

    #[test]
    fn test_config_min_score_out_of_range() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, r#"{"ranker": {"type": "bm25", "min_score": 1.5}}"#);
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("min_score"));
    }

    #[test]
    fn test_config_bad_log_level() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, r#"{"ranker": {"type": "bm25"}, "log_level": "loud"}"#);
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_config_invalid_path() {
        let err = Config::load(Path::new("nonexistent.json")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
