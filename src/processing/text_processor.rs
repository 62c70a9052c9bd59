//! Text normalization and tokenization

use regex::Regex;
use std::collections::HashSet;

pub struct TextProcessor {
    punctuation_regex: Regex,
    term_regex: Regex,
}

/// A document after normalization. `lowered` keeps punctuation so phrases
/// like "c++" can still be found; `cleaned` has it stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedText {
    pub lowered: String,
    pub cleaned: String,
    pub tokens: HashSet<String>,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let punctuation_regex = Regex::new(r"[^\w\s]").expect("Invalid punctuation regex");

        // Terms for weighting are runs of two or more word characters.
        let term_regex = Regex::new(r"\b\w\w+\b").expect("Invalid term regex");

        Self {
            punctuation_regex,
            term_regex,
        }
    }

    /// Lower-case and strip every character that is not a word character or
    /// whitespace. Whitespace runs are left as they are.
    pub fn normalize(&self, text: &str) -> String {
        self.strip_punctuation(&text.to_lowercase())
    }

    fn strip_punctuation(&self, lowered: &str) -> String {
        self.punctuation_regex.replace_all(lowered, "").into_owned()
    }

    pub fn tokenize(&self, cleaned: &str) -> HashSet<String> {
        cleaned.split_whitespace().map(str::to_string).collect()
    }

    pub fn process(&self, text: &str) -> ProcessedText {
        let lowered = text.to_lowercase();
        let cleaned = self.strip_punctuation(&lowered);
        let tokens = self.tokenize(&cleaned);

        ProcessedText {
            lowered,
            cleaned,
            tokens,
        }
    }

    /// Terms used by the similarity scorer, in document order.
    pub fn terms<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.term_regex.find_iter(text).map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        let processor = TextProcessor::new();
        assert_eq!(
            processor.normalize("Python, AWS & Docker!  C++ (problem-solving)"),
            "python aws  docker  c problemsolving"
        );
    }

    #[test]
    fn test_normalize_keeps_underscore_and_digits() {
        let processor = TextProcessor::new();
        assert_eq!(processor.normalize("snake_case V2.0"), "snake_case v20");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let processor = TextProcessor::new();
        for text in [
            "Senior Engineer - Machine Learning (NLP), 5+ yrs.",
            "  Ünïcödé\tTEXT\n\nwith—dashes… ",
            "",
        ] {
            let once = processor.normalize(text);
            assert_eq!(processor.normalize(&once), once);
        }
    }

    #[test]
    fn test_process_cleaned_matches_normalize() {
        let processor = TextProcessor::new();
        for text in ["Senior Engineer - ML (NLP), 5+ yrs.", "C++ / Problem-Solving!", ""] {
            let processed = processor.process(text);
            assert_eq!(processed.cleaned, processor.normalize(text));
            assert_eq!(processor.normalize(&processed.cleaned), processed.cleaned);
        }
    }

    #[test]
    fn test_tokenize_splits_on_any_whitespace() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("python\taws\n\ndocker  python");
        assert_eq!(tokens.len(), 3);
        assert!(tokens.contains("docker"));
    }

    #[test]
    fn test_process_keeps_lowered_copy() {
        let processor = TextProcessor::new();
        let processed = processor.process("Strong C++ skills");
        assert_eq!(processed.lowered, "strong c++ skills");
        assert_eq!(processed.cleaned, "strong c skills");
        assert!(processed.tokens.contains("c"));
    }

    #[test]
    fn test_terms_skip_single_characters() {
        let processor = TextProcessor::new();
        let terms: Vec<&str> = processor.terms("r and c are languages").collect();
        assert_eq!(terms, vec!["and", "are", "languages"]);
    }
}
