//! TF-IDF cosine similarity over a two-document corpus

use crate::processing::text_processor::TextProcessor;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Stop-word list applied before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopWords {
    #[default]
    English,
    None,
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

type TermCounts = BTreeMap<String, f64>;

pub struct SimilarityScorer {
    stop_words: HashSet<&'static str>,
    processor: TextProcessor,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(StopWords::English)
    }
}

impl SimilarityScorer {
    pub fn new(stop_words: StopWords) -> Self {
        let stop_words = match stop_words {
            StopWords::English => ENGLISH_STOP_WORDS.iter().copied().collect(),
            StopWords::None => HashSet::new(),
        };

        Self {
            stop_words,
            processor: TextProcessor::new(),
        }
    }

    /// Cosine similarity of the TF-IDF vectors of `a` and `b`, in [0, 1].
    /// Zero when either document has no weighted terms.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        let counts_a = self.term_counts(a);
        let counts_b = self.term_counts(b);

        let weights_a = Self::weigh(&counts_a, &counts_b);
        let weights_b = Self::weigh(&counts_b, &counts_a);

        let dot: f64 = weights_a
            .iter()
            .filter_map(|(term, wa)| weights_b.get(term).map(|wb| wa * wb))
            .sum();
        let norm_a = weights_a.values().map(|w| w * w).sum::<f64>().sqrt();
        let norm_b = weights_b.values().map(|w| w * w).sum::<f64>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            debug!("Similarity is 0: a document has no weighted terms");
            return 0.0;
        }

        let score = (dot / (norm_a * norm_b)).clamp(0.0, 1.0);
        debug!(
            "TF-IDF similarity {:.4} over {} + {} terms",
            score,
            weights_a.len(),
            weights_b.len()
        );
        score
    }

    fn term_counts(&self, text: &str) -> TermCounts {
        let lowered = text.to_lowercase();
        let mut counts = TermCounts::new();
        for term in self.processor.terms(&lowered) {
            if !self.stop_words.contains(term) {
                *counts.entry(term.to_string()).or_insert(0.0) += 1.0;
            }
        }
        counts
    }

    /// Raw counts times smoothed idf over the corpus {own, other}.
    fn weigh(own: &TermCounts, other: &TermCounts) -> TermCounts {
        const CORPUS_SIZE: f64 = 2.0;
        own.iter()
            .map(|(term, count)| {
                let df = if other.contains_key(term) { 2.0 } else { 1.0 };
                let idf = ((1.0 + CORPUS_SIZE) / (1.0 + df)).ln() + 1.0;
                (term.clone(), count * idf)
            })
            .collect()
    }
}
