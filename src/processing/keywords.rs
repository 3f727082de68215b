//! Skill keyword extraction against a fixed vocabulary

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Skill terms shipped with the default configuration.
pub const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "javascript", "html", "css", "pandas", "numpy", "tensorflow", "scikit",
    "sklearn", "matplotlib", "seaborn", "mysql", "mongodb", "react", "flask", "django",
    "streamlit", "fastapi", "aws", "azure", "git", "github", "docker", "kubernetes", "nlp",
    "bert", "data", "model", "machine", "learning", "analysis",
];

/// Closed set of recognised skill terms, lower-case. Built once from
/// configuration and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillVocabulary {
    terms: BTreeSet<String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied())
    }
}

impl SkillVocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Terms the keyword tokenizer can never produce (anything other than
    /// three or more ASCII letters).
    pub fn unreachable_terms(&self) -> Vec<&str> {
        self.iter()
            .filter(|t| t.len() < 3 || !t.chars().all(|c| c.is_ascii_lowercase()))
            .collect()
    }
}

pub struct KeywordExtractor {
    word_regex: Regex,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        let word_regex = Regex::new(r"[a-z]{3,}").expect("Invalid keyword regex");
        Self { word_regex }
    }

    /// Skill terms present in `text`, duplicates collapsed.
    pub fn extract(&self, text: &str, vocabulary: &SkillVocabulary) -> BTreeSet<String> {
        let lowered = text.to_lowercase();

        self.word_regex
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|word| vocabulary.contains(word))
            .map(str::to_string)
            .collect()
    }
}

/// Job keywords the resume does not mention.
pub fn keyword_gap(job_keywords: &BTreeSet<String>, resume_keywords: &BTreeSet<String>) -> BTreeSet<String> {
    job_keywords.difference(resume_keywords).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keyword_extraction_filters_by_vocabulary() {
        let vocabulary = SkillVocabulary::new(["python", "docker"]);
        let extractor = KeywordExtractor::new();

        let keywords = extractor.extract("I know Python, Docker, and SQL", &vocabulary);
        assert_eq!(keywords, set(&["python", "docker"]));
    }

    #[test]
    fn test_duplicates_collapse() {
        let vocabulary = SkillVocabulary::default();
        let extractor = KeywordExtractor::new();

        let keywords = extractor.extract("AWS aws Aws, docker DOCKER", &vocabulary);
        assert_eq!(keywords, set(&["aws", "docker"]));
    }

    #[test]
    fn test_short_runs_ignored() {
        let vocabulary = SkillVocabulary::new(["ml", "git"]);
        let extractor = KeywordExtractor::new();

        let keywords = extractor.extract("ML and Git", &vocabulary);
        assert_eq!(keywords, set(&["git"]));
    }

    #[test]
    fn test_maximal_runs_only() {
        let vocabulary = SkillVocabulary::new(["java", "python"]);
        let extractor = KeywordExtractor::new();

        // "javascript" is one run and does not contain a separate "java" match.
        let keywords = extractor.extract("javascript, python3", &vocabulary);
        assert_eq!(keywords, set(&["python"]));
    }

    #[test]
    fn test_vocabulary_normalises_terms() {
        let vocabulary = SkillVocabulary::new(["  Python ", "DOCKER", ""]);
        assert_eq!(vocabulary.len(), 2);
        assert!(vocabulary.contains("python"));
        assert!(vocabulary.contains("docker"));
    }

    #[test]
    fn test_unreachable_terms() {
        let vocabulary = SkillVocabulary::new(["c++", "go", "rust", "node.js"]);
        assert_eq!(vocabulary.unreachable_terms(), vec!["c++", "go", "node.js"]);
        assert!(SkillVocabulary::default().unreachable_terms().is_empty());
    }

    #[test]
    fn test_keyword_gap() {
        let job = set(&["python", "docker", "kubernetes"]);
        let resume = set(&["python", "react"]);

        let missing = keyword_gap(&job, &resume);
        assert_eq!(missing, set(&["docker", "kubernetes"]));
        assert!(missing.is_subset(&job));
        assert!(missing.is_disjoint(&resume));
    }
}
