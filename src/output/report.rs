//! Report structures wrapping a match result for presentation

use crate::config::{Config, ScoringConfig};
use crate::processing::analyzer::{MatchAnalysis, MatchResult};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Coarse reading of the score used for colouring and verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn classify(score: u8, scoring: &ScoringConfig) -> Self {
        if score >= scoring.strong_threshold {
            ScoreBand::Strong
        } else if score >= scoring.moderate_threshold {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            ScoreBand::Strong => "Strong match",
            ScoreBand::Moderate => "Partial match",
            ScoreBand::Weak => "Weak match",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub result: MatchResult,
    pub band: ScoreBand,
    pub resume_source: String,
    pub job_source: String,
    pub resume_preview: String,
    pub job_preview: String,
}

impl AnalysisReport {
    pub fn new(analysis: &MatchAnalysis, resume_source: &str, job_source: &str, config: &Config) -> Self {
        let limit = config.output.preview_chars;

        Self {
            result: analysis.result.clone(),
            band: ScoreBand::classify(analysis.result.score, &config.scoring),
            resume_source: resume_source.to_string(),
            job_source: job_source.to_string(),
            resume_preview: truncate_text(analysis.resume_text.as_str(), limit),
            job_preview: analysis.job_text.as_str().to_string(),
        }
    }
}

/// Truncate to at most `max_graphemes` user-visible characters, appending
/// an ellipsis when anything was cut.
pub fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let mut graphemes = text.grapheme_indices(true);
    match graphemes.nth(max_graphemes) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
