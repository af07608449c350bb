//! Fixed keyword vocabularies shared by extraction and scoring
//!
//! All lists are compiled once per process and never mutated.

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical skill names recognized in resume text, in output order.
pub const RESUME_SKILLS: &[&str] = &[
    "Python", "JavaScript", "Java", "C++", "C#", "PHP", "Ruby", "Go",
    "React", "Angular", "Vue", "Node.js", "Django", "Flask", "Express",
    "MySQL", "PostgreSQL", "MongoDB", "AWS", "Azure", "Docker", "Kubernetes",
    "Git", "HTML", "CSS", "Bootstrap", "jQuery", "TypeScript",
];

/// Technical skills looked for in job descriptions, grouped by category.
pub const TECHNICAL_SKILLS: &[(&str, &[&str])] = &[
    ("programming", &["python", "java", "javascript", "c++", "c#", "php", "ruby", "go", "rust", "swift", "kotlin"]),
    ("frontend", &["html", "css", "javascript", "react", "angular", "vue", "jquery", "bootstrap", "sass", "typescript"]),
    ("backend", &["node.js", "django", "flask", "express", "spring", "asp.net", "laravel", "rails"]),
    ("database", &["mysql", "postgresql", "mongodb", "sqlite", "oracle", "sql server", "redis"]),
    ("cloud", &["aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "git", "github"]),
    ("frameworks", &["react", "angular", "vue", "django", "flask", "express", "spring", "laravel"]),
    ("tools", &["git", "docker", "kubernetes", "jenkins", "jira", "confluence", "postman"]),
];

pub const EDUCATION_KEYWORDS: &[&str] = &["bachelor", "master", "phd", "degree", "university", "college"];

pub const PROCESS_KEYWORDS: &[&str] = &[
    "agile", "scrum", "kanban", "ci/cd", "devops", "microservices",
    "api", "rest", "graphql", "testing", "unit test", "integration test",
    "machine learning", "ai", "data science", "analytics", "sql", "nosql",
];

/// Matches a years-of-experience requirement such as "5+ years experience".
pub static EXPERIENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\+?\s*years?\s*experience").expect("valid experience regex"));

/// Substring lookup for a fixed list of terms over lowercased text.
pub struct TermMatcher {
    terms: Vec<&'static str>,
    automaton: AhoCorasick,
}

impl TermMatcher {
    /// Build a matcher; terms are compared in lowercase.
    pub fn new<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        let mut unique: Vec<&'static str> = Vec::new();
        for term in terms {
            if !unique.contains(&term) {
                unique.push(term);
            }
        }

        let patterns: Vec<String> = unique.iter().map(|t| t.to_lowercase()).collect();
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .expect("static vocabulary builds a valid automaton");

        Self { terms: unique, automaton }
    }

    /// Terms occurring anywhere in `lowered`, in vocabulary order.
    ///
    /// `lowered` must already be lowercase.
    pub fn find_in(&self, lowered: &str) -> Vec<&'static str> {
        let mut seen = vec![false; self.terms.len()];
        for mat in self.automaton.find_overlapping_iter(lowered) {
            seen[mat.pattern().as_usize()] = true;
        }

        self.terms
            .iter()
            .zip(seen)
            .filter_map(|(term, found)| found.then_some(*term))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

pub static RESUME_SKILL_MATCHER: Lazy<TermMatcher> =
    Lazy::new(|| TermMatcher::new(RESUME_SKILLS.iter().copied()));

pub static TECHNICAL_SKILL_MATCHER: Lazy<TermMatcher> = Lazy::new(|| {
    TermMatcher::new(
        TECHNICAL_SKILLS
            .iter()
            .flat_map(|(_, skills)| skills.iter().copied()),
    )
});

pub static EDUCATION_MATCHER: Lazy<TermMatcher> =
    Lazy::new(|| TermMatcher::new(EDUCATION_KEYWORDS.iter().copied()));

pub static PROCESS_MATCHER: Lazy<TermMatcher> =
    Lazy::new(|| TermMatcher::new(PROCESS_KEYWORDS.iter().copied()));
