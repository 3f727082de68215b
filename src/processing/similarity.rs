//! TF-IDF cosine similarity between a resume and a job description

use crate::error::{Result, ResumeMatchError};
use crate::processing::document::DocumentType;
use crate::processing::text_processor::TextProcessor;
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Scores two documents in a vector space built over exactly those two
/// documents. Nothing is kept between calls.
pub struct SimilarityScorer {
    processor: TextProcessor,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
        }
    }

    /// Similarity as an integer percentage in [0, 100].
    pub fn score(&self, resume: &str, job: &str) -> Result<u8> {
        let similarity = self.cosine_similarity(resume, job)?;
        Ok(to_percentage(similarity))
    }

    /// Raw cosine similarity of the two TF-IDF vectors.
    pub fn cosine_similarity(&self, resume: &str, job: &str) -> Result<f64> {
        let resume_counts = self.term_counts(resume, DocumentType::Resume)?;
        let job_counts = self.term_counts(job, DocumentType::JobDescription)?;

        let idf = inverse_document_frequencies(&[&resume_counts, &job_counts]);
        let resume_vector = tfidf_vector(&resume_counts, &idf);
        let job_vector = tfidf_vector(&job_counts, &idf);

        let similarity = cosine(&resume_vector, &job_vector);
        debug!(
            "TF-IDF space: {} terms, cosine similarity {:.6}",
            idf.len(),
            similarity
        );

        Ok(similarity)
    }

    fn term_counts(&self, text: &str, input: DocumentType) -> Result<HashMap<String, f64>> {
        let tokens = self.processor.tokenize(text);
        if tokens.is_empty() {
            return Err(ResumeMatchError::EmptyDocument { input });
        }

        let mut counts = HashMap::new();
        for token in tokens {
            *counts.entry(token).or_insert(0.0) += 1.0;
        }
        Ok(counts)
    }
}

/// Smoothed idf: `ln((1 + n) / (1 + df)) + 1`.
fn inverse_document_frequencies(documents: &[&HashMap<String, f64>]) -> BTreeMap<String, f64> {
    let mut document_frequency: BTreeMap<String, f64> = BTreeMap::new();
    for counts in documents {
        for term in counts.keys() {
            *document_frequency.entry(term.clone()).or_insert(0.0) += 1.0;
        }
    }

    let n = documents.len() as f64;
    document_frequency
        .into_iter()
        .map(|(term, df)| {
            let idf = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
            (term, idf)
        })
        .collect()
}

fn tfidf_vector(counts: &HashMap<String, f64>, idf: &BTreeMap<String, f64>) -> HashMap<String, f64> {
    counts
        .iter()
        .map(|(term, tf)| {
            let weight = tf * idf.get(term).copied().unwrap_or(1.0);
            (term.clone(), weight)
        })
        .collect()
}

fn cosine(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    for (term, weight) in a {
        norm_a += weight * weight;
        if let Some(other) = b.get(term) {
            dot += weight * other;
        }
    }
    let norm_b: f64 = b.values().map(|w| w * w).sum();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Scale to a percentage, rounding half to even, clamped to [0, 100].
pub fn to_percentage(similarity: f64) -> u8 {
    let scaled = (similarity * 100.0).round_ties_even();
    scaled.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_documents_score_100() {
        let scorer = SimilarityScorer::new();
        let text = "Senior Rust engineer building distributed storage systems";

        assert_eq!(scorer.score(text, text).unwrap(), 100);
    }

    #[test]
    fn test_disjoint_documents_score_0() {
        let scorer = SimilarityScorer::new();

        assert_eq!(scorer.score("rust compiler internals", "gardening tomatoes outdoors").unwrap(), 0);
    }

    #[test]
    fn test_known_pair_is_pinned() {
        let scorer = SimilarityScorer::new();
        let resume = "python developer with aws experience";
        let job = "seeking python and aws engineer";

        // Shared terms get idf 1, the rest ln(3/2) + 1.
        let unique = (1.5f64).ln() + 1.0;
        let expected = 2.0 / (2.0 + 2.0 * unique * unique);

        let similarity = scorer.cosine_similarity(resume, job).unwrap();
        assert!((similarity - expected).abs() < 1e-12);
        assert_eq!(scorer.score(resume, job).unwrap(), 34);
    }

    #[test]
    fn test_term_frequency_matters() {
        let scorer = SimilarityScorer::new();
        let job = "python aws";

        let once = scorer.cosine_similarity("python kotlin", job).unwrap();
        let repeated = scorer.cosine_similarity("python python python kotlin", job).unwrap();
        assert!(repeated > once);
    }

    #[test]
    fn test_empty_resume_is_an_error() {
        let scorer = SimilarityScorer::new();

        let err = scorer.score("and the of", "python engineer").unwrap_err();
        assert!(matches!(err, ResumeMatchError::EmptyDocument { input: DocumentType::Resume }));
    }

    #[test]
    fn test_empty_job_is_an_error() {
        let scorer = SimilarityScorer::new();

        let err = scorer.score("python engineer", "   ").unwrap_err();
        assert!(matches!(
            err,
            ResumeMatchError::EmptyDocument { input: DocumentType::JobDescription }
        ));
    }

    #[test]
    fn test_rounding_half_to_even() {
        assert_eq!(to_percentage(0.125), 12);
        assert_eq!(to_percentage(0.375), 38);
        assert_eq!(to_percentage(0.994), 99);
        assert_eq!(to_percentage(1.0000001), 100);
        assert_eq!(to_percentage(-0.2), 0);
    }
}
