//! File type detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

/// Result of looking at a file name: either a supported format or the raw
/// extension that was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileType {
    Supported(DocumentFormat),
    Unsupported(String),
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Supported(DocumentFormat::Pdf),
            "docx" => FileType::Supported(DocumentFormat::Docx),
            other => FileType::Unsupported(other.to_string()),
        }
    }

    /// Same rule as splitting the file name on '.' and taking the last piece,
    /// so a name with no dot yields the whole name as its "extension".
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let ext = name.rsplit('.').next().unwrap_or_default();
        Self::from_extension(ext)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "PDF"),
            DocumentFormat::Docx => write!(f, "DOCX"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Supported(DocumentFormat::Pdf));
        assert_eq!(FileType::from_extension("Docx"), FileType::Supported(DocumentFormat::Docx));
    }

    #[test]
    fn test_unsupported_extension_is_reported() {
        assert_eq!(
            FileType::from_path(Path::new("notes/resume.TXT")),
            FileType::Unsupported("txt".to_string())
        );
    }

    #[test]
    fn test_path_with_multiple_dots() {
        assert_eq!(
            FileType::from_path(Path::new("jane.doe.resume.docx")),
            FileType::Supported(DocumentFormat::Docx)
        );
    }
}
