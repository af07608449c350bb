//! Resume profile extraction: name, email, phone and skills

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::input::RawDocument;
use crate::processing::name_finder::{name_finder_from_config, HeuristicNameFinder, NameFinder};
use crate::processing::vocabulary::RESUME_SKILL_MATCHER;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder stored in a field that could not be extracted.
pub const NOT_FOUND: &str = "Not found";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("valid phone regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Canonical skill names joined with ", ".
    pub skills: String,
}

impl ExtractedProfile {
    pub fn has_name(&self) -> bool {
        self.name != NOT_FOUND
    }

    pub fn has_email(&self) -> bool {
        self.email != NOT_FOUND
    }

    pub fn has_phone(&self) -> bool {
        self.phone != NOT_FOUND
    }

    pub fn skill_list(&self) -> Vec<&str> {
        if self.skills == NOT_FOUND {
            Vec::new()
        } else {
            self.skills.split(", ").collect()
        }
    }
}

/// Turns documents into [`ExtractedProfile`]s.
///
/// Holds no mutable state and can be shared across threads.
pub struct DocumentExtractor {
    name_finder: Box<dyn NameFinder>,
}

impl DocumentExtractor {
    pub fn new(name_finder: Box<dyn NameFinder>) -> Self {
        Self { name_finder }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        let name_finder = name_finder_from_config(config);
        info!("Using {} name detection", name_finder.strategy());
        Self::new(name_finder)
    }

    pub fn name_strategy(&self) -> &'static str {
        self.name_finder.strategy()
    }

    /// Normalize a document to text and extract the profile fields.
    pub fn parse(&self, document: RawDocument) -> Result<ExtractedProfile> {
        let source = document.source().to_string();
        let text = document.into_text()?;
        debug!("{}: {} characters of text", source, text.chars().count());
        Ok(self.extract_profile(&text))
    }

    /// Read a file and parse it, inferring the format from the extension.
    pub fn parse_path(&self, path: &Path) -> Result<ExtractedProfile> {
        self.parse(RawDocument::from_path(path)?)
    }

    /// Field extraction over already normalized text.
    pub fn extract_profile(&self, text: &str) -> ExtractedProfile {
        ExtractedProfile {
            name: self.extract_name(text),
            email: extract_email(text),
            phone: extract_phone(text),
            skills: extract_skills(text),
        }
    }

    pub fn extract_name(&self, text: &str) -> String {
        self.name_finder
            .find_name(text)
            .unwrap_or_else(|| NOT_FOUND.to_string())
    }
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new(Box::new(HeuristicNameFinder::default()))
    }
}

/// First email address in the text.
pub fn extract_email(text: &str) -> String {
    EMAIL_REGEX
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string())
}

/// First phone number in the text, exactly as written.
pub fn extract_phone(text: &str) -> String {
    PHONE_REGEX
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string())
}

/// Vocabulary skills contained in the text, in vocabulary order.
pub fn extract_skills(text: &str) -> String {
    let found = RESUME_SKILL_MATCHER.find_in(&text.to_lowercase());
    if found.is_empty() {
        NOT_FOUND.to_string()
    } else {
        found.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_email_wins() {
        let text = "Contact: jane.doe@example.com and jane@personal.net";
        assert_eq!(extract_email(text), "jane.doe@example.com");
    }

    #[test]
    fn test_email_requires_tld() {
        assert_eq!(extract_email("reach me at jane@localhost"), NOT_FOUND);
        assert_eq!(extract_email("mail: a.b+cv@mail.co.uk."), "a.b+cv@mail.co.uk");
    }

    #[test]
    fn test_phone_variants_kept_verbatim() {
        assert_eq!(extract_phone("Phone: (555) 123-4567"), "(555) 123-4567");
        assert_eq!(extract_phone("Tel +44 555.123.4567 (mobile)"), "+44 555.123.4567");
        assert_eq!(extract_phone("call 5551234567 now"), "5551234567");
        assert_eq!(extract_phone("no digits here"), NOT_FOUND);
    }

    #[test]
    fn test_skills_in_vocabulary_order() {
        let text = "Proficient in Python, React, and PostgreSQL";
        assert_eq!(extract_skills(text), "Python, React, PostgreSQL");

        let reordered = "PostgreSQL and React, plus some python";
        assert_eq!(extract_skills(reordered), "Python, React, PostgreSQL");
    }

    #[test]
    fn test_skills_use_substring_containment() {
        // "go" appears inside "good" and "java" inside "javascript"
        assert_eq!(extract_skills("good javascript"), "JavaScript, Java, Go");
        assert_eq!(extract_skills("Accounting and payroll"), NOT_FOUND);
    }

    #[test]
    fn test_extract_profile() {
        let extractor = DocumentExtractor::default();
        let text = "Jane Doe\njane.doe@example.com | (555) 123-4567\nSkills: Rust, Docker, AWS";
        let profile = extractor.extract_profile(text);

        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.email, "jane.doe@example.com");
        assert_eq!(profile.phone, "(555) 123-4567");
        assert_eq!(profile.skills, "AWS, Docker");
        assert_eq!(profile.skill_list(), vec!["AWS", "Docker"]);
    }

    #[test]
    fn test_missing_fields_use_sentinel() {
        let profile = DocumentExtractor::default().extract_profile("");
        assert!(!profile.has_name());
        assert!(!profile.has_email());
        assert!(!profile.has_phone());
        assert_eq!(profile.skills, NOT_FOUND);
        assert!(profile.skill_list().is_empty());
    }

    #[test]
    fn test_parse_rejects_unsupported_format_tag() {
        let result = RawDocument::with_tag(b"Jane Doe".to_vec(), "odt", "cv.odt");
        assert!(result.is_err());
    }
}
