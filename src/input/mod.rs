//! Input processing module
//! Handles format detection and text normalization of raw documents

pub mod document;
pub mod file_detector;
pub mod text_extractor;

pub use document::RawDocument;
pub use file_detector::DocumentFormat;
