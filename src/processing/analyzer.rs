//! Analysis pipeline: extraction, skill matching and similarity scoring

use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::input::manager::{ExtractedText, InputManager};
use crate::output::report::{build_report, AnalysisReport, AnalysisResult};
use crate::processing::document::{Document, DocumentRole};
use crate::processing::similarity::{SimilarityScorer, StopWords};
use crate::processing::skill_matcher::{SkillMatcher, SkillVocabulary};
use crate::processing::text_processor::TextProcessor;
use log::{debug, info};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::time::Instant;

/// Where a single analysis request currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisStage {
    Idle,
    FilesSelected,
    Analyzing,
    Complete,
    Failed,
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisStage::Idle => "idle",
            AnalysisStage::FilesSelected => "files selected",
            AnalysisStage::Analyzing => "analyzing",
            AnalysisStage::Complete => "complete",
            AnalysisStage::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Coordinates extraction, matching and scoring for one job/resume pair.
pub struct AnalysisEngine {
    input: InputManager,
    processor: TextProcessor,
    matcher: SkillMatcher,
    scorer: SimilarityScorer,
    stage: AnalysisStage,
}

impl AnalysisEngine {
    pub fn new(vocabulary: SkillVocabulary, stop_words: StopWords) -> Result<Self> {
        Ok(Self {
            input: InputManager::new(),
            processor: TextProcessor::new(),
            matcher: SkillMatcher::new(vocabulary)?,
            scorer: SimilarityScorer::new(stop_words),
            stage: AnalysisStage::Idle,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.vocabulary(), config.similarity.stop_words)
    }

    pub fn stage(&self) -> AnalysisStage {
        self.stage
    }

    /// Run the whole pipeline on two files. Missing inputs fail before any
    /// extraction; empty text fails before scoring.
    pub async fn analyze_files(
        &mut self,
        job: Option<&Path>,
        resume: Option<&Path>,
    ) -> Result<AnalysisReport> {
        self.stage = AnalysisStage::Idle;
        let start_time = Instant::now();

        let (job, resume) = match (job, resume) {
            (Some(job), Some(resume)) => (
                Document::new(DocumentRole::JobDescription, job),
                Document::new(DocumentRole::Resume, resume),
            ),
            (None, _) => return Err(self.fail(AnalyzerError::MissingInput(DocumentRole::JobDescription))),
            (_, None) => return Err(self.fail(AnalyzerError::MissingInput(DocumentRole::Resume))),
        };
        for document in [&job, &resume] {
            match document.format {
                Some(format) => debug!("Selected {} {} ({})", document.role, document.file_name(), format),
                None => debug!("Selected {} {} (unsupported type)", document.role, document.file_name()),
            }
        }
        self.transition(AnalysisStage::FilesSelected);

        let job_text = self.input.extract_or_warn(job.path()).await;
        let resume_text = self.input.extract_or_warn(resume.path()).await;

        let result = self.analyze_extracted(&job_text, &resume_text)?;
        let processing_time = start_time.elapsed();

        info!(
            "Analysis of {} against {} finished in {} ms",
            resume.file_name(),
            job.file_name(),
            processing_time.as_millis()
        );

        Ok(AnalysisReport::new(
            result,
            job.file_name(),
            resume.file_name(),
            processing_time.as_millis() as u64,
            self.matcher.vocabulary().len(),
        ))
    }

    /// Score two texts that are already in memory.
    pub fn analyze_texts(&mut self, job_text: &str, resume_text: &str) -> Result<AnalysisResult> {
        self.stage = AnalysisStage::FilesSelected;
        let job_text = ExtractedText {
            text: job_text.to_string(),
            warning: None,
        };
        let resume_text = ExtractedText {
            text: resume_text.to_string(),
            warning: None,
        };
        self.analyze_extracted(&job_text, &resume_text)
    }

    fn analyze_extracted(
        &mut self,
        job_text: &ExtractedText,
        resume_text: &ExtractedText,
    ) -> Result<AnalysisResult> {
        for (role, extracted) in [
            (DocumentRole::JobDescription, job_text),
            (DocumentRole::Resume, resume_text),
        ] {
            if extracted.text.trim().is_empty() {
                let warnings = extracted.warning.iter().cloned().collect();
                return Err(self.fail(AnalyzerError::EmptyText { role, warnings }));
            }
        }

        self.transition(AnalysisStage::Analyzing);

        let job = self.processor.process(&job_text.text);
        let resume = self.processor.process(&resume_text.text);

        let job_skills = self.matcher.match_processed(&job);
        let resume_skills = self.matcher.match_processed(&resume);
        debug!(
            "Found {} job skills and {} resume skills",
            job_skills.len(),
            resume_skills.len()
        );

        let score = self.scorer.similarity(&job.cleaned, &resume.cleaned);
        let result = build_report(score, &job_skills, &resume_skills);

        self.transition(AnalysisStage::Complete);
        Ok(result)
    }

    fn transition(&mut self, next: AnalysisStage) {
        debug!("Analysis stage: {} -> {}", self.stage, next);
        self.stage = next;
    }

    fn fail(&mut self, error: AnalyzerError) -> AnalyzerError {
        self.transition(AnalysisStage::Failed);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::skill_matcher::SkillSet;

    const JD: &str = "Looking for a Python developer with AWS and Docker experience";
    const RESUME: &str = "Experienced Python engineer skilled in AWS";

    fn set(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn engine(phrases: &[&str]) -> AnalysisEngine {
        AnalysisEngine::new(SkillVocabulary::new(phrases), StopWords::English).unwrap()
    }

    #[test]
    fn test_python_aws_docker_scenario() {
        let mut engine = engine(&["python", "aws", "docker", "sql"]);
        let result = engine.analyze_texts(JD, RESUME).unwrap();

        assert_eq!(result.matched, set(&["aws", "python"]));
        assert_eq!(result.missing, set(&["docker"]));
        assert!(result.extra.is_empty());
        assert!(result.score > 0.0 && result.score < 1.0);
        assert_eq!(engine.stage(), AnalysisStage::Complete);
    }

    #[test]
    fn test_default_vocabulary_short_skill_false_positive() {
        // "r" occurs inside "developer" and "experience".
        let mut engine = AnalysisEngine::new(SkillVocabulary::default(), StopWords::English).unwrap();
        let result = engine.analyze_texts(JD, RESUME).unwrap();
        assert!(result.matched.contains("r"));
        assert!(result.missing.contains("docker"));
    }

    #[test]
    fn test_empty_resume_halts_before_scoring() {
        let mut engine = engine(&["python"]);
        let err = engine.analyze_texts(JD, "").unwrap_err();

        assert!(matches!(
            err,
            AnalyzerError::EmptyText {
                role: DocumentRole::Resume,
                ..
            }
        ));
        assert_eq!(engine.stage(), AnalysisStage::Failed);
    }

    #[test]
    fn test_whitespace_only_job_is_empty() {
        let mut engine = engine(&["python"]);
        let err = engine.analyze_texts("\n\n  \t", RESUME).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::EmptyText {
                role: DocumentRole::JobDescription,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_input_fails_immediately() {
        let mut engine = engine(&["python"]);
        let err = engine
            .analyze_files(None, Some(Path::new("resume.pdf")))
            .await
            .unwrap_err();

        assert!(matches!(err, AnalyzerError::MissingInput(DocumentRole::JobDescription)));
        assert_eq!(engine.stage(), AnalysisStage::Failed);
    }

    #[test]
    fn test_stage_starts_idle() {
        assert_eq!(engine(&[]).stage(), AnalysisStage::Idle);
    }
}
