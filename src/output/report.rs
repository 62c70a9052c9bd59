//! Analysis result and report structures

use crate::processing::skill_matcher::SkillSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score plus the skill breakdown of one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// TF-IDF cosine similarity (0.0 to 1.0)
    pub score: f64,

    /// Skills in both documents
    pub matched: SkillSet,

    /// Skills the job description asks for that the resume lacks
    pub missing: SkillSet,

    /// Resume skills the job description does not ask for
    pub extra: SkillSet,
}

/// Full report: the result plus where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the analyzer used
    pub analyzer_version: String,

    pub job_file: String,
    pub resume_file: String,

    /// Total processing time
    pub processing_time_ms: u64,

    /// Number of phrases in the active vocabulary
    pub vocabulary_size: usize,
}

/// Combine a similarity score with the skills found in each document.
pub fn build_report(score: f64, jd_skills: &SkillSet, resume_skills: &SkillSet) -> AnalysisResult {
    AnalysisResult {
        score,
        matched: jd_skills.intersection(resume_skills).cloned().collect(),
        missing: jd_skills.difference(resume_skills).cloned().collect(),
        extra: resume_skills.difference(jd_skills).cloned().collect(),
    }
}

impl AnalysisResult {
    /// Score as a percentage with two decimals, e.g. "73.42%".
    pub fn score_percentage(&self) -> String {
        format_percentage(self.score)
    }

    /// Skills the job description asks for, found or not.
    pub fn job_skill_count(&self) -> usize {
        self.matched.len() + self.missing.len()
    }

    pub fn resume_skill_count(&self) -> usize {
        self.matched.len() + self.extra.len()
    }
}

impl AnalysisReport {
    pub fn new(
        result: AnalysisResult,
        job_file: String,
        resume_file: String,
        processing_time_ms: u64,
        vocabulary_size: usize,
    ) -> Self {
        Self {
            result,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
                job_file,
                resume_file,
                processing_time_ms,
                vocabulary_size,
            },
        }
    }
}

pub fn format_percentage(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

/// Upper-case the first letter of every alphabetic run and lower-case the
/// rest: "machine learning" -> "Machine Learning", "c++" -> "C++".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

/// Sorted, title-cased skills ready for display.
pub fn display_skills(skills: &SkillSet) -> Vec<String> {
    skills.iter().map(|s| title_case(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_report_set_differences() {
        let jd = set(&["python", "aws", "docker"]);
        let resume = set(&["python", "aws", "git"]);
        let result = build_report(0.5, &jd, &resume);

        assert_eq!(result.matched, set(&["aws", "python"]));
        assert_eq!(result.missing, set(&["docker"]));
        assert_eq!(result.extra, set(&["git"]));
    }

    #[test]
    fn test_build_report_identities() {
        let jd = set(&["sql", "excel", "tableau", "r"]);
        let resume = set(&["excel", "r", "azure"]);
        let result = build_report(0.0, &jd, &resume);

        let union: SkillSet = result.matched.union(&result.missing).cloned().collect();
        assert_eq!(union, jd);
        assert!(result.matched.is_disjoint(&result.missing));
        assert_eq!(result.extra, resume.difference(&jd).cloned().collect::<SkillSet>());
        assert_eq!(result.job_skill_count(), jd.len());
        assert_eq!(result.resume_skill_count(), resume.len());
    }

    #[test]
    fn test_sets_iterate_alphabetically() {
        let jd = set(&["scrum", "agile", "git"]);
        let result = build_report(0.0, &jd, &SkillSet::new());
        let missing: Vec<&str> = result.missing.iter().map(String::as_str).collect();
        assert_eq!(missing, vec!["agile", "git", "scrum"]);
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.734213), "73.42%");
        assert_eq!(format_percentage(0.0), "0.00%");
        assert_eq!(format_percentage(1.0), "100.00%");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("machine learning"), "Machine Learning");
        assert_eq!(title_case("c++"), "C++");
        assert_eq!(title_case("problem-solving"), "Problem-Solving");
        assert_eq!(title_case("nosql"), "Nosql");
        assert_eq!(title_case("power bi"), "Power Bi");
    }

    #[test]
    fn test_display_skills_are_sorted_and_title_cased() {
        let skills = set(&["sql", "aws", "machine learning"]);
        assert_eq!(display_skills(&skills), vec!["Aws", "Machine Learning", "Sql"]);
    }
}
