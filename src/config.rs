//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatchError};
use crate::processing::keywords::{SkillVocabulary, DEFAULT_SKILLS};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub keywords: KeywordConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordConfig {
    pub skills: Vec<String>,
}

/// Score bands used when presenting a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub strong_threshold: u8,
    pub moderate_threshold: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub preview_chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keywords: KeywordConfig {
                skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            },
            scoring: ScoringConfig {
                strong_threshold: 70,
                moderate_threshold: 40,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                preview_chars: 1000,
            },
        }
    }
}

impl Config {
    /// Load `path`, writing defaults there first if it does not exist yet.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            info!("Creating default configuration at {}", path.display());
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeMatchError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Overwrite `path` with the defaults. The existing file is never
    /// parsed, so a broken configuration can always be recovered.
    pub fn reset(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeMatchError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-match")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let vocabulary = self.vocabulary();
        if vocabulary.is_empty() {
            return Err(ResumeMatchError::Configuration(
                "keywords.skills must contain at least one term".to_string(),
            ));
        }

        let unreachable = vocabulary.unreachable_terms();
        if !unreachable.is_empty() {
            return Err(ResumeMatchError::Configuration(format!(
                "skills must be at least three ASCII letters: {}",
                unreachable.join(", ")
            )));
        }

        let scoring = &self.scoring;
        if scoring.strong_threshold > 100 || scoring.moderate_threshold > scoring.strong_threshold {
            return Err(ResumeMatchError::Configuration(format!(
                "score thresholds must satisfy moderate <= strong <= 100 (got {} and {})",
                scoring.moderate_threshold, scoring.strong_threshold
            )));
        }

        Ok(())
    }

    pub fn vocabulary(&self) -> SkillVocabulary {
        SkillVocabulary::new(&self.keywords.skills)
    }
}
