//! Document structures

use crate::input::file_detector::{DocumentFormat, FileType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentRole {
    JobDescription,
    Resume,
}

/// One input to an analysis. Lives only for the duration of that analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub role: DocumentRole,
    pub path: PathBuf,
    pub format: Option<DocumentFormat>,
}

impl Document {
    pub fn new(role: DocumentRole, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = match FileType::from_path(&path) {
            FileType::Supported(format) => Some(format),
            FileType::Unsupported(_) => None,
        };
        Self { role, path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::JobDescription => write!(f, "job description"),
            DocumentRole::Resume => write!(f, "resume"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_detects_format() {
        let doc = Document::new(DocumentRole::Resume, "cv/Jane Doe.PDF");
        assert_eq!(doc.format, Some(DocumentFormat::Pdf));
        assert_eq!(doc.file_name(), "Jane Doe.PDF");
    }

    #[test]
    fn test_document_with_unknown_format() {
        let doc = Document::new(DocumentRole::JobDescription, "posting.txt");
        assert_eq!(doc.format, None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(DocumentRole::JobDescription.to_string(), "job description");
        assert_eq!(DocumentRole::Resume.to_string(), "resume");
    }
}
