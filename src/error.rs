//! Error handling for the resume analyzer

use crate::input::file_detector::DocumentFormat;
use crate::processing::document::DocumentRole;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error reading {format}: {cause}")]
    Extraction {
        format: DocumentFormat,
        cause: String,
    },

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Please provide both the job description and the resume ({0} is missing)")]
    MissingInput(DocumentRole),

    #[error("Could not extract text from the {role}{}", format_warnings(.warnings))]
    EmptyText {
        role: DocumentRole,
        warnings: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

fn format_warnings(warnings: &[String]) -> String {
    if warnings.is_empty() {
        String::new()
    } else {
        format!(" ({})", warnings.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_message_lists_warnings() {
        let err = AnalyzerError::EmptyText {
            role: DocumentRole::Resume,
            warnings: vec!["Unsupported file type: txt".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Could not extract text from the resume (Unsupported file type: txt)"
        );
    }

    #[test]
    fn test_empty_text_message_without_warnings() {
        let err = AnalyzerError::EmptyText {
            role: DocumentRole::JobDescription,
            warnings: Vec::new(),
        };
        assert_eq!(err.to_string(), "Could not extract text from the job description");
    }
}
