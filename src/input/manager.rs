//! Input manager: reads a file, routes it to the right extractor

use crate::error::{AnalyzerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::extractor_for;
use log::{info, warn};
use std::path::Path;
use tokio::fs;

/// Text pulled out of one document. Empty text means extraction failed and
/// `warning` says why.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub warning: Option<String>,
}

impl ExtractedText {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read and extract a document, propagating any failure.
    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        let format = match FileType::from_path(path) {
            FileType::Supported(format) => format,
            FileType::Unsupported(ext) => return Err(AnalyzerError::UnsupportedFormat(ext)),
        };

        if !path.exists() {
            return Err(AnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let payload = fs::read(path).await?;
        info!("Extracting text from {}: {}", format, path.display());
        extractor_for(format).extract(&payload)
    }

    /// Extraction failures become empty text plus a visible warning, so the
    /// caller can decide whether to go on.
    pub async fn extract_or_warn(&self, path: &Path) -> ExtractedText {
        match self.extract_text(path).await {
            Ok(text) => ExtractedText { text, warning: None },
            Err(e) => {
                warn!("{}", e);
                ExtractedText {
                    text: String::new(),
                    warning: Some(e.to_string()),
                }
            }
        }
    }
}
