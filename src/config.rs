//! Configuration management for the resume ranker

use crate::error::{Result, ResumeRankerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub vectorizer: VectorizerConfig,
    pub ranking: RankingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Vocabulary cap; `None` keeps every term
    pub max_features: Option<usize>,
    pub ngram_min: usize,
    pub ngram_max: usize,
    /// Tokens shorter than this never become terms
    pub min_token_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Top terms kept per candidate in the report
    pub top_terms: usize,
    /// Characters of raw job text kept as the report summary
    pub summary_length: usize,
    pub parallel_normalization: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub json_path: PathBuf,
    pub text_path: PathBuf,
    pub pretty_json: bool,
    pub color_output: bool,
    /// Candidates echoed to the console after a ranking run
    pub summary_candidates: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: Some(100),
            ngram_min: 1,
            ngram_max: 2,
            min_token_length: 2,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_terms: 10,
            summary_length: 200,
            parallel_normalization: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: PathBuf::from("ranking_report.json"),
            text_path: PathBuf::from("ranking_report.txt"),
            pretty_json: true,
            color_output: true,
            summary_candidates: 5,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerConfig::default(),
            ranking: RankingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl VectorizerConfig {
    pub fn ngram_range(&self) -> (usize, usize) {
        (self.ngram_min, self.ngram_max)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ngram_min == 0 {
            return Err(ResumeRankerError::Configuration(
                "ngram_min must be at least 1".to_string(),
            ));
        }
        if self.ngram_min > self.ngram_max {
            return Err(ResumeRankerError::Configuration(format!(
                "invalid ngram range ({}, {})",
                self.ngram_min, self.ngram_max
            )));
        }
        if self.max_features == Some(0) {
            return Err(ResumeRankerError::Configuration(
                "max_features must be greater than zero".to_string(),
            ));
        }
        if self.min_token_length == 0 {
            return Err(ResumeRankerError::Configuration(
                "min_token_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeRankerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeRankerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()
    }
}
