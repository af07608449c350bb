//! Raw document container and text normalization routing

use crate::error::Result;
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::path::Path;

/// Document bytes plus the format they are declared to be in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    bytes: Vec<u8>,
    format: DocumentFormat,
    source: String,
}

impl RawDocument {
    pub fn new(bytes: Vec<u8>, format: DocumentFormat, source: impl Into<String>) -> Self {
        Self {
            bytes,
            format,
            source: source.into(),
        }
    }

    /// Build from bytes and a free-form format tag such as a file extension.
    pub fn with_tag(bytes: Vec<u8>, tag: &str, source: impl Into<String>) -> Result<Self> {
        let format = DocumentFormat::from_extension(tag)?;
        Ok(Self::new(bytes, format, source))
    }

    /// Read a file, inferring the format from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let format = DocumentFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        Ok(Self::new(bytes, format, path.display().to_string()))
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Convert to plain text. Consumes the document.
    pub fn into_text(self) -> Result<String> {
        info!("Extracting {} text from {}", self.format, self.source);
        match self.format {
            DocumentFormat::Pdf => PdfExtractor.extract(&self.bytes),
            DocumentFormat::Docx => DocxExtractor.extract(&self.bytes),
            DocumentFormat::Text => PlainTextExtractor.extract(&self.bytes),
        }
    }
}
