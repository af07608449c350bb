//! Candidate name detection
//!
//! Two strategies are available behind the [`NameFinder`] trait. The
//! [`EntityNameFinder`] recognizes person names using a given-names lexicon
//! loaded at startup and defers to the layout heuristic when it finds nothing.
//! The [`HeuristicNameFinder`] only looks at the top of the document. Which one
//! is used is decided once, when the extractor is built.

use crate::config::ExtractionConfig;
use crate::error::{Result, ResumeScreenerError};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::path::Path;

/// Maximum number of words in a detected name.
const MAX_NAME_WORDS: usize = 4;

pub trait NameFinder: Send + Sync {
    /// Return the candidate's name, or `None` when nothing plausible is found.
    fn find_name(&self, text: &str) -> Option<String>;

    /// Short identifier used in logs.
    fn strategy(&self) -> &'static str;
}

/// Picks the first short, purely alphabetic line near the top of the text.
#[derive(Debug, Clone)]
pub struct HeuristicNameFinder {
    scan_lines: usize,
}

impl HeuristicNameFinder {
    pub fn new(scan_lines: usize) -> Self {
        Self { scan_lines }
    }
}

impl Default for HeuristicNameFinder {
    fn default() -> Self {
        Self::new(10)
    }
}

impl NameFinder for HeuristicNameFinder {
    fn find_name(&self, text: &str) -> Option<String> {
        text.split('\n')
            .take(self.scan_lines)
            .map(str::trim)
            .find(|line| is_name_like_line(line))
            .map(str::to_string)
    }

    fn strategy(&self) -> &'static str {
        "heuristic"
    }
}

fn is_name_like_line(line: &str) -> bool {
    if line.split_whitespace().count() > MAX_NAME_WORDS {
        return false;
    }
    let mut letters = line.chars().filter(|c| *c != ' ').peekable();
    letters.peek().is_some() && letters.all(char::is_alphabetic)
}

/// Lexicon-backed person name recognizer.
///
/// A name is a run of two to four capitalized alphabetic words on one line
/// whose first word is a known given name.
#[derive(Debug, Clone)]
pub struct EntityNameFinder {
    given_names: HashSet<String>,
    fallback: HeuristicNameFinder,
}

impl EntityNameFinder {
    pub fn from_names<I, S>(names: I, fallback: HeuristicNameFinder) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let given_names: HashSet<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty() && !n.starts_with('#'))
            .collect();

        if given_names.is_empty() {
            return Err(ResumeScreenerError::Configuration(
                "name lexicon contains no entries".to_string(),
            ));
        }

        Ok(Self { given_names, fallback })
    }

    /// Load a lexicon file with one given name per line; `#` starts a comment line.
    pub fn from_file(path: &Path, fallback: HeuristicNameFinder) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let finder = Self::from_names(content.lines(), fallback)?;
        info!(
            "Loaded {} given names from {}",
            finder.lexicon_size(),
            path.display()
        );
        Ok(finder)
    }

    pub fn lexicon_size(&self) -> usize {
        self.given_names.len()
    }

    fn find_entity(&self, text: &str) -> Option<String> {
        for line in text.lines() {
            let words: Vec<&str> = line
                .split_whitespace()
                .map(|w| w.trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '.')))
                .collect();

            for start in 0..words.len() {
                if !is_capitalized_word(words[start])
                    || !self.given_names.contains(&words[start].to_lowercase())
                {
                    continue;
                }

                let run = words[start..]
                    .iter()
                    .take(MAX_NAME_WORDS)
                    .take_while(|w| is_capitalized_word(w))
                    .count();

                if run >= 2 {
                    return Some(words[start..start + run].join(" ").trim().to_string());
                }
            }
        }
        None
    }
}

impl NameFinder for EntityNameFinder {
    fn find_name(&self, text: &str) -> Option<String> {
        if let Some(name) = self.find_entity(text) {
            return Some(name);
        }
        debug!("No person entity found, falling back to heuristic");
        self.fallback.find_name(text)
    }

    fn strategy(&self) -> &'static str {
        "entity"
    }
}

fn is_capitalized_word(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(char::is_alphabetic),
        _ => false,
    }
}

/// Build the name finder described by the configuration.
///
/// A missing or unusable lexicon is not fatal: the heuristic finder is used.
pub fn name_finder_from_config(config: &ExtractionConfig) -> Box<dyn NameFinder> {
    let heuristic = HeuristicNameFinder::new(config.name_scan_lines);

    match &config.name_lexicon_path {
        Some(path) => match EntityNameFinder::from_file(path, heuristic.clone()) {
            Ok(finder) => Box::new(finder),
            Err(e) => {
                warn!(
                    "Name lexicon {} unavailable ({}), using heuristic name detection",
                    path.display(),
                    e
                );
                Box::new(heuristic)
            }
        },
        None => Box::new(heuristic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_heuristic_picks_first_alphabetic_line() {
        let finder = HeuristicNameFinder::default();
        let text = "\n  Jane Marie Doe  \njane@example.com\nSoftware Engineer";
        assert_eq!(finder.find_name(text), Some("Jane Marie Doe".to_string()));
    }

    #[test]
    fn test_heuristic_rejects_long_or_non_alphabetic_lines() {
        let finder = HeuristicNameFinder::default();
        let text = "Curriculum Vitae of a Senior Engineer\njane@example.com\n+1 555 123 4567";
        assert_eq!(finder.find_name(text), None);
    }

    #[test]
    fn test_heuristic_only_scans_leading_lines() {
        let mut text = "1\n".repeat(10);
        text.push_str("Jane Doe\n");
        assert_eq!(HeuristicNameFinder::new(10).find_name(&text), None);
        assert_eq!(
            HeuristicNameFinder::new(11).find_name(&text),
            Some("Jane Doe".to_string())
        );
    }

    #[test]
    fn test_entity_finder_finds_name_anywhere() {
        let finder =
            EntityNameFinder::from_names(["jane", "john"], HeuristicNameFinder::default()).unwrap();
        let text = "RESUME 2024\nContact: Jane Doe, jane@example.com\nPython";
        assert_eq!(finder.find_name(text), Some("Jane Doe".to_string()));
    }

    #[test]
    fn test_entity_finder_requires_surname() {
        let finder =
            EntityNameFinder::from_names(["john"], HeuristicNameFinder::default()).unwrap();
        assert_eq!(finder.find_entity("Worked with John on Rust"), None);
    }

    #[test]
    fn test_entity_finder_falls_back_to_heuristic() {
        let finder =
            EntityNameFinder::from_names(["john"], HeuristicNameFinder::default()).unwrap();
        let text = "Maria Lopez\nmaria@example.com";
        assert_eq!(finder.find_name(text), Some("Maria Lopez".to_string()));
    }

    #[test]
    fn test_empty_lexicon_is_rejected() {
        let result = EntityNameFinder::from_names(["", "# comment"], HeuristicNameFinder::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_config_selects_strategy() {
        let mut config = crate::config::Config::default().extraction;
        assert_eq!(name_finder_from_config(&config).strategy(), "heuristic");

        config.name_lexicon_path = Some("/nonexistent/names.txt".into());
        assert_eq!(name_finder_from_config(&config).strategy(), "heuristic");

        let mut lexicon = tempfile::NamedTempFile::new().unwrap();
        writeln!(lexicon, "# given names\njane\njohn").unwrap();
        config.name_lexicon_path = Some(lexicon.path().to_path_buf());
        assert_eq!(name_finder_from_config(&config).strategy(), "entity");
    }

    #[test]
    fn test_lexicon_file_skips_comments_and_blanks() {
        let mut lexicon = tempfile::NamedTempFile::new().unwrap();
        writeln!(lexicon, "# given names\nJane\n\n  john  \njane").unwrap();

        let finder = EntityNameFinder::from_file(lexicon.path(), HeuristicNameFinder::default()).unwrap();
        assert_eq!(finder.lexicon_size(), 2);
    }
}
