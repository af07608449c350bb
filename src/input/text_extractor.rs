//! Text extraction from the supported document formats

use crate::error::{Result, ResumeScreenerError};
use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use log::debug;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed inputs, so decode on a separate thread
        let data = bytes.to_vec();
        let handle = std::thread::spawn(move || pdf_extract::extract_text_from_mem(&data));

        let text = handle
            .join()
            .map_err(|_| {
                ResumeScreenerError::Extraction("PDF extraction thread crashed".to_string())
            })?
            .map_err(|e| ResumeScreenerError::Extraction(format!("Failed to extract text from PDF: {}", e)))?;

        debug!("Extracted {} characters from PDF", text.len());
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| ResumeScreenerError::Extraction(format!("Failed to read DOCX: {}", e)))?;

        let mut text = String::new();
        let mut paragraphs = 0usize;
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                push_paragraph_children(&paragraph.children, &mut text);
                text.push('\n');
                paragraphs += 1;
            }
        }

        debug!("Extracted {} DOCX paragraphs", paragraphs);
        Ok(text)
    }
}

fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            _ => {}
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| ResumeScreenerError::Extraction(format!("Text is not valid UTF-8: {}", e)))?;
        // CRLF first so it does not turn into two line breaks
        Ok(content.replace("\r\n", "\n").replace('\r', "\n"))
    }
}
