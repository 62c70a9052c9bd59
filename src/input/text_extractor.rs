//! Text extraction from PDF and DOCX payloads

use crate::error::{AnalyzerError, Result};
use crate::input::file_detector::DocumentFormat;
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};

pub trait TextExtractor {
    fn format(&self) -> DocumentFormat;

    fn extract(&self, payload: &[u8]) -> Result<String>;
}

/// Pick the extractor for a declared format.
pub fn extractor_for(format: DocumentFormat) -> Box<dyn TextExtractor> {
    match format {
        DocumentFormat::Pdf => Box::new(PdfExtractor),
        DocumentFormat::Docx => Box::new(DocxExtractor),
    }
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract(&self, payload: &[u8]) -> Result<String> {
        Ok(Self::pages(payload)?.concat())
    }
}

impl PdfExtractor {
    /// Text of every page in order. Pages without text come back empty.
    pub fn pages(payload: &[u8]) -> Result<Vec<String>> {
        // pdf-extract panics on some malformed inputs instead of returning an error.
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(payload)
        }))
        .map_err(|panic| AnalyzerError::Extraction {
            format: DocumentFormat::Pdf,
            cause: panic_message(panic),
        })?
        .map_err(|e| AnalyzerError::Extraction {
            format: DocumentFormat::Pdf,
            cause: e.to_string(),
        })?;

        debug!("Extracted {} PDF pages", pages.len());
        Ok(pages)
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "PDF parser aborted".to_string()
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract(&self, payload: &[u8]) -> Result<String> {
        let paragraphs = read_docx_paragraphs(payload).map_err(|e| AnalyzerError::Extraction {
            format: DocumentFormat::Docx,
            cause: e.to_string(),
        })?;

        debug!("Extracted {} DOCX paragraphs", paragraphs.len());
        let mut text = String::new();
        for paragraph in paragraphs {
            text.push_str(&paragraph);
            text.push('\n');
        }
        Ok(text)
    }
}

fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().map(Vec::as_slice) == Some(name)
}

/// Paragraphs that are direct children of `w:body`, in document order,
/// including empty ones. Table cells, text boxes and `mc:Fallback` copies are
/// skipped; only `w:t`, `w:tab`, `w:br` and `w:cr` inside runs contribute text.
fn read_docx_paragraphs(data: &[u8]) -> anyhow::Result<Vec<String>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

    let mut document_file = archive.by_name("word/document.xml")?;
    let mut xml = String::new();
    document_file.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(false);

    let mut paragraphs = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<String> = None;
    // Depth of the element whose subtree is being ignored.
    let mut skip_depth: Option<usize> = None;
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if skip_depth.is_none() {
                    match name.as_slice() {
                        b"w:p" if current.is_none() && parent_is(&stack, b"w:body") => {
                            current = Some(String::new());
                        }
                        b"w:p" | b"w:txbxContent" | b"mc:Fallback" => skip_depth = Some(stack.len()),
                        b"w:t" if current.is_some() && parent_is(&stack, b"w:r") => in_text_run = true,
                        _ => {}
                    }
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                if skip_depth.is_some() {
                    continue;
                }
                match (e.name().as_ref(), current.as_mut()) {
                    (b"w:p", None) if parent_is(&stack, b"w:body") => paragraphs.push(String::new()),
                    (b"w:tab", Some(text)) if parent_is(&stack, b"w:r") => text.push('\t'),
                    (b"w:br" | b"w:cr", Some(text)) if parent_is(&stack, b"w:r") => text.push('\n'),
                    _ => {}
                }
            }
            Event::End(e) => {
                stack.pop();
                if skip_depth == Some(stack.len()) {
                    skip_depth = None;
                } else if skip_depth.is_none() {
                    match e.name().as_ref() {
                        b"w:p" => paragraphs.extend(current.take()),
                        b"w:t" => in_text_run = false,
                        _ => {}
                    }
                }
            }
            Event::Text(e) if in_text_run && skip_depth.is_none() => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&e.xml_content()?);
                }
            }
            Event::GeneralRef(e) if in_text_run && skip_depth.is_none() => {
                let Some(text) = current.as_mut() else { continue };
                if let Some(ch) = e.resolve_char_ref()? {
                    text.push(ch);
                } else {
                    let name = e.decode()?;
                    match quick_xml::escape::resolve_predefined_entity(&name) {
                        Some(value) => text.push_str(value),
                        None => anyhow::bail!("unknown entity &{};", name),
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
