//! Skill keyword matching against a fixed vocabulary

use crate::error::{AnalyzerError, Result};
use crate::processing::text_processor::{ProcessedText, TextProcessor};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Skills found in one document.
pub type SkillSet = BTreeSet<String>;

pub const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "c++", "javascript", "html", "css", "sql", "nosql",
    "machine learning", "deep learning", "nlp", "data science", "tableau",
    "power bi", "excel", "aws", "azure", "google cloud", "docker", "kubernetes",
    "git", "agile", "scrum", "project management", "communication", "leadership",
    "problem-solving", "critical thinking", "data analysis", "r",
];

/// Ordered, lower-cased, de-duplicated list of skill phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillVocabulary {
    phrases: Vec<String>,
}

impl SkillVocabulary {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty() && seen.insert(p.clone()))
            .collect();
        Self { phrases }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS)
    }
}

impl From<Vec<String>> for SkillVocabulary {
    fn from(phrases: Vec<String>) -> Self {
        Self::new(phrases)
    }
}

impl From<SkillVocabulary> for Vec<String> {
    fn from(vocabulary: SkillVocabulary) -> Self {
        vocabulary.phrases
    }
}

/// Finds vocabulary phrases in text, either as whole tokens or as substrings.
pub struct SkillMatcher {
    vocabulary: SkillVocabulary,
    substring_matcher: AhoCorasick,
    processor: TextProcessor,
}

impl SkillMatcher {
    pub fn new(vocabulary: SkillVocabulary) -> Result<Self> {
        // Standard semantics so overlapping phrases ("java" in "javascript") all report.
        let substring_matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(vocabulary.phrases())
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            vocabulary,
            substring_matcher,
            processor: TextProcessor::new(),
        })
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Match raw text. Case does not matter.
    pub fn match_skills(&self, text: &str) -> SkillSet {
        self.match_processed(&self.processor.process(text))
    }

    /// A phrase matches if it is one of the tokens, or occurs anywhere in the
    /// lower-cased text with or without punctuation. Short phrases such as
    /// "r" therefore also match inside longer words.
    pub fn match_processed(&self, processed: &ProcessedText) -> SkillSet {
        let mut matched = SkillSet::new();

        for phrase in self.vocabulary.phrases() {
            if processed.tokens.contains(phrase) {
                matched.insert(phrase.clone());
            }
        }

        for haystack in [&processed.lowered, &processed.cleaned] {
            for mat in self.substring_matcher.find_overlapping_iter(haystack.as_str()) {
                matched.insert(self.vocabulary.phrases()[mat.pattern().as_usize()].clone());
            }
        }

        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(phrases: &[&str]) -> SkillMatcher {
        SkillMatcher::new(SkillVocabulary::new(phrases)).unwrap()
    }

    fn set(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_vocabulary_is_lowercased_and_deduplicated() {
        let vocabulary = SkillVocabulary::new(["Python", " python ", "AWS", "", "Machine Learning"]);
        assert_eq!(vocabulary.phrases(), &["python", "aws", "machine learning"]);
    }

    #[test]
    fn test_default_vocabulary() {
        let vocabulary = SkillVocabulary::default();
        assert_eq!(vocabulary.len(), 30);
        assert_eq!(vocabulary.phrases()[0], "python");
        assert_eq!(vocabulary.phrases()[29], "r");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let matcher = matcher(&["python", "sql"]);
        assert_eq!(matcher.match_skills("Python"), matcher.match_skills("python"));
        assert_eq!(matcher.match_skills("PYTHON and Sql"), set(&["python", "sql"]));
    }

    #[test]
    fn test_multi_word_phrases() {
        let matcher = matcher(&["machine learning", "power bi", "data science"]);
        let found = matcher.match_skills("Built Machine Learning pipelines, reported in Power BI.");
        assert_eq!(found, set(&["machine learning", "power bi"]));
    }

    #[test]
    fn test_phrases_with_punctuation_match_the_lowered_text() {
        let matcher = matcher(&["c++", "problem-solving", "java"]);
        let found = matcher.match_skills("Modern C++ and strong Problem-Solving");
        assert_eq!(found, set(&["c++", "problem-solving"]));
    }

    #[test]
    fn test_overlapping_substrings_all_match() {
        let matcher = matcher(&["java", "javascript"]);
        assert_eq!(matcher.match_skills("JavaScript"), set(&["java", "javascript"]));
    }

    #[test]
    fn test_duplicates_collapse() {
        let matcher = matcher(&["docker"]);
        assert_eq!(matcher.match_skills("docker docker Docker"), set(&["docker"]));
    }

    #[test]
    fn test_short_skill_matches_inside_longer_words() {
        // Known limitation of substring matching.
        let matcher = matcher(&["r"]);
        assert_eq!(matcher.match_skills("I drive a car"), set(&["r"]));
    }

    #[test]
    fn test_empty_vocabulary_matches_nothing() {
        let matcher = matcher(&[]);
        assert!(matcher.match_skills("python aws docker").is_empty());
    }
}
