//! Resume vs job description analysis

use crate::error::{Result, ResumeMatchError};
use crate::input::text_extractor::extract_text;
use crate::processing::document::{DocumentInput, DocumentType, ExtractedText};
use crate::processing::keywords::{keyword_gap, KeywordExtractor, SkillVocabulary};
use crate::processing::similarity::SimilarityScorer;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Outcome of one analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Similarity percentage, 0-100.
    pub score: u8,
    /// Job skills not found in the resume, sorted.
    pub missing_skills: BTreeSet<String>,
}

/// Everything computed for one request, including the extracted text the
/// result was derived from.
#[derive(Debug, Clone)]
pub struct MatchAnalysis {
    pub result: MatchResult,
    pub resume_text: ExtractedText,
    pub job_text: ExtractedText,
    pub resume_keywords: BTreeSet<String>,
    pub job_keywords: BTreeSet<String>,
}

/// Composition root: extract both sides, score them and compute the skill gap.
pub struct MatchReport<'a> {
    vocabulary: &'a SkillVocabulary,
    scorer: SimilarityScorer,
    extractor: KeywordExtractor,
}

impl<'a> MatchReport<'a> {
    pub fn new(vocabulary: &'a SkillVocabulary) -> Self {
        Self {
            vocabulary,
            scorer: SimilarityScorer::new(),
            extractor: KeywordExtractor::new(),
        }
    }

    pub fn run(&self, resume: Option<DocumentInput>, job: Option<DocumentInput>) -> Result<MatchResult> {
        Ok(self.analyze(resume, job)?.result)
    }

    pub fn analyze(&self, resume: Option<DocumentInput>, job: Option<DocumentInput>) -> Result<MatchAnalysis> {
        let resume = resume.ok_or(ResumeMatchError::MissingInput {
            input: DocumentType::Resume,
        })?;
        let job = job.ok_or(ResumeMatchError::MissingInput {
            input: DocumentType::JobDescription,
        })?;

        let resume_text = self.resolve_text(resume, DocumentType::Resume)?;
        let job_text = self.resolve_text(job, DocumentType::JobDescription)?;

        self.analyze_text(resume_text, job_text)
    }

    /// Analyze text that has already been extracted.
    pub fn analyze_text(&self, resume_text: ExtractedText, job_text: ExtractedText) -> Result<MatchAnalysis> {
        let score = self.scorer.score(resume_text.as_str(), job_text.as_str())?;

        let resume_keywords = self.extractor.extract(resume_text.as_str(), self.vocabulary);
        let job_keywords = self.extractor.extract(job_text.as_str(), self.vocabulary);
        let missing_skills = keyword_gap(&job_keywords, &resume_keywords);

        info!(
            "Match score {}%, {} of {} job skills missing",
            score,
            missing_skills.len(),
            job_keywords.len()
        );

        Ok(MatchAnalysis {
            result: MatchResult { score, missing_skills },
            resume_text,
            job_text,
            resume_keywords,
            job_keywords,
        })
    }

    fn resolve_text(&self, input: DocumentInput, side: DocumentType) -> Result<ExtractedText> {
        match input {
            DocumentInput::Document(document) => {
                if document.document_type() != side {
                    return Err(ResumeMatchError::InvalidInput(format!(
                        "{} document supplied as the {}",
                        document.document_type(),
                        side
                    )));
                }
                info!("Extracting {} text ({})", side, document.format());
                extract_text(&document)
            }
            DocumentInput::Text(text) => Ok(ExtractedText::new(text, side)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::file_detector::DocumentFormat;
    use crate::processing::document::Document;

    fn text(s: &str) -> Option<DocumentInput> {
        Some(DocumentInput::Text(s.to_string()))
    }

    #[test]
    fn test_missing_skills_reported() {
        let vocabulary = SkillVocabulary::default();
        let report = MatchReport::new(&vocabulary);

        let result = report
            .run(
                text("Python developer with React and AWS experience"),
                text("Seeking Python engineer familiar with Docker, Kubernetes and AWS"),
            )
            .unwrap();

        let expected: BTreeSet<String> = ["docker", "kubernetes"].iter().map(|s| s.to_string()).collect();
        assert_eq!(result.missing_skills, expected);
        assert!(result.score > 0 && result.score < 100);
    }

    #[test]
    fn test_identical_inputs() {
        let vocabulary = SkillVocabulary::default();
        let report = MatchReport::new(&vocabulary);
        let body = "Machine learning engineer: python, tensorflow, docker";

        let result = report.run(text(body), text(body)).unwrap();
        assert_eq!(result.score, 100);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_gap_invariants_hold() {
        let vocabulary = SkillVocabulary::default();
        let report = MatchReport::new(&vocabulary);
        let pairs = [
            ("python django mysql", "python flask mongodb aws"),
            ("data analysis with pandas", "machine learning model training"),
            ("git github docker", "docker"),
        ];

        for (resume, job) in pairs {
            let analysis = report.analyze(text(resume), text(job)).unwrap();
            let missing = &analysis.result.missing_skills;
            assert!(missing.is_subset(&analysis.job_keywords));
            assert!(missing.is_disjoint(&analysis.resume_keywords));
            assert!(missing.iter().all(|s| vocabulary.contains(s)));
        }
    }

    #[test]
    fn test_gap_invariants_over_generated_pairs() {
        let vocabulary = SkillVocabulary::default();
        let report = MatchReport::new(&vocabulary);
        // Skills, near-misses that only contain a skill, and plain words.
        let words = [
            "python", "Docker", "AWS", "kubernetes", "python3", "mysql-server", "gitlab", "engineer",
            "data", "analysis",
        ];

        let compose = |mask: u32, offset: usize| -> String {
            let mut parts = vec!["developer"];
            for (i, word) in words.iter().enumerate() {
                if mask & (1 << ((i + offset) % words.len())) != 0 {
                    parts.push(*word);
                }
            }
            parts.join(" ")
        };

        for mask in (0u32..1024).step_by(7) {
            for other in (0u32..1024).step_by(61) {
                let resume = compose(mask, 0);
                let job = compose(other, 3);
                let analysis = report.analyze(text(&resume), text(&job)).unwrap();
                let missing = &analysis.result.missing_skills;

                assert!(missing.is_subset(&analysis.job_keywords), "{} / {}", resume, job);
                assert!(missing.is_disjoint(&analysis.resume_keywords), "{} / {}", resume, job);
                let expected: BTreeSet<String> = analysis
                    .job_keywords
                    .difference(&analysis.resume_keywords)
                    .cloned()
                    .collect();
                assert_eq!(missing, &expected);
                assert!(analysis.result.score <= 100);
            }
        }
    }

    #[test]
    fn test_missing_resume() {
        let vocabulary = SkillVocabulary::default();
        let report = MatchReport::new(&vocabulary);

        let err = report.run(None, text("python")).unwrap_err();
        assert!(matches!(err, ResumeMatchError::MissingInput { input: DocumentType::Resume }));
    }

    #[test]
    fn test_missing_job() {
        let vocabulary = SkillVocabulary::default();
        let report = MatchReport::new(&vocabulary);

        let err = report.run(text("python"), None).unwrap_err();
        assert!(matches!(
            err,
            ResumeMatchError::MissingInput { input: DocumentType::JobDescription }
        ));
    }

    #[test]
    fn test_empty_resume_never_scores() {
        let vocabulary = SkillVocabulary::default();
        let report = MatchReport::new(&vocabulary);

        let err = report.run(text("the and of"), text("python engineer")).unwrap_err();
        assert!(matches!(err, ResumeMatchError::EmptyDocument { input: DocumentType::Resume }));
    }

    #[test]
    fn test_extraction_errors_propagate() {
        let vocabulary = SkillVocabulary::default();
        let report = MatchReport::new(&vocabulary);
        let broken = Document::new(vec![0xc3, 0x28], DocumentFormat::PlainText, DocumentType::Resume);

        let err = report
            .run(Some(DocumentInput::Document(broken)), text("python"))
            .unwrap_err();
        assert!(matches!(err, ResumeMatchError::Decode { input: DocumentType::Resume, .. }));
    }

    #[test]
    fn test_documents_and_text_mix() {
        let vocabulary = SkillVocabulary::default();
        let report = MatchReport::new(&vocabulary);
        let resume = Document::new(
            b"Java and Python developer".to_vec(),
            DocumentFormat::PlainText,
            DocumentType::Resume,
        );

        let analysis = report
            .analyze(Some(DocumentInput::Document(resume)), text("Python role"))
            .unwrap();
        assert_eq!(analysis.resume_text.as_str(), "Java and Python developer");
        assert_eq!(analysis.job_text.document_type, DocumentType::JobDescription);
        assert!(analysis.result.missing_skills.is_empty());
    }

    #[test]
    fn test_wrong_side_document_rejected() {
        let vocabulary = SkillVocabulary::default();
        let report = MatchReport::new(&vocabulary);
        let job = Document::new(b"python".to_vec(), DocumentFormat::PlainText, DocumentType::JobDescription);

        let err = report.run(Some(DocumentInput::Document(job)), text("python")).unwrap_err();
        assert!(matches!(err, ResumeMatchError::InvalidInput(_)));
    }

    #[test]
    fn test_result_serializes_as_sorted_array() {
        let result = MatchResult {
            score: 42,
            missing_skills: ["kubernetes", "docker"].iter().map(|s| s.to_string()).collect(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"score":42,"missing_skills":["docker","kubernetes"]}"#);
    }
}
