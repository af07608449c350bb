//! Configuration management for the resume screener

use crate::error::{Result, ResumeScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub scoring: ScoringConfig,
    pub storage: StorageConfig,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Given-names lexicon used by the entity name finder. One name per line.
    pub name_lexicon_path: Option<PathBuf>,
    pub name_scan_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub high_score_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub records_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub max_concurrent: usize,
    pub document_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        let records_path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("resume-screener")
            .join("all_resumes.csv");

        Self {
            extraction: ExtractionConfig {
                name_lexicon_path: None,
                name_scan_lines: 10,
            },
            scoring: ScoringConfig {
                high_score_threshold: 80.0,
            },
            storage: StorageConfig { records_path },
            processing: ProcessingConfig {
                max_concurrent: 4,
                document_timeout_secs: 30,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first run.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ResumeScreenerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeScreenerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.processing.max_concurrent == 0 {
            return Err(ResumeScreenerError::Configuration(
                "processing.max_concurrent must be at least 1".to_string(),
            ));
        }
        if self.processing.document_timeout_secs == 0 {
            return Err(ResumeScreenerError::Configuration(
                "processing.document_timeout_secs must be at least 1".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.scoring.high_score_threshold) {
            return Err(ResumeScreenerError::Configuration(
                "scoring.high_score_threshold must be between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }

    /// Set a single value addressed as `section.key`.
    ///
    /// The configuration is left untouched when the new value is invalid.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "extraction.name_lexicon_path" => {
                updated.extraction.name_lexicon_path = if value.is_empty() || value == "none" {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "extraction.name_scan_lines" => {
                updated.extraction.name_scan_lines = parse_value(key, value)?;
            }
            "scoring.high_score_threshold" => {
                updated.scoring.high_score_threshold = parse_value(key, value)?;
            }
            "storage.records_path" => {
                updated.storage.records_path = PathBuf::from(value);
            }
            "processing.max_concurrent" => {
                updated.processing.max_concurrent = parse_value(key, value)?;
            }
            "processing.document_timeout_secs" => {
                updated.processing.document_timeout_secs = parse_value(key, value)?;
            }
            "output.format" => {
                updated.output.format = crate::cli::parse_output_format(value)
                    .map_err(ResumeScreenerError::Configuration)?;
            }
            "output.color_output" => {
                updated.output.color_output = parse_value(key, value)?;
            }
            _ => {
                return Err(ResumeScreenerError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| {
        ResumeScreenerError::Configuration(format!("Invalid value '{}' for {}: {}", value, key, e))
    })
}
