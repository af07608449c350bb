//! Document format detection

use crate::error::{Result, ResumeScreenerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Extensions accepted for resume uploads.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" | "text" => Ok(DocumentFormat::Text),
            other => Err(ResumeScreenerError::UnsupportedFormat(format!(
                "'{}' (supported: {})",
                other,
                SUPPORTED_EXTENSIONS.join(", ")
            ))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ResumeScreenerError::UnsupportedFormat(format!(
                    "file has no extension: {}",
                    path.display()
                ))
            })?;

        Self::from_extension(extension)
    }

    pub fn is_supported_path(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }
}

impl FromStr for DocumentFormat {
    type Err = ResumeScreenerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Text => "txt",
        };
        write!(f, "{}", name)
    }
}
