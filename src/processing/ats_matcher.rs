//! ATS (Applicant Tracking System) keyword matching and scoring

use crate::processing::vocabulary::{
    EDUCATION_MATCHER, EXPERIENCE_PATTERN, PROCESS_MATCHER, TECHNICAL_SKILL_MATCHER,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Separators between skills in free-form resume skill text.
static SKILL_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;|]|\band\b").expect("valid skill separator regex"));

/// Tokens this short or shorter are dropped from resume skills.
const MIN_TOKEN_CHARS: usize = 2;

/// Shortest job keyword considered for the abbreviation rule.
const MIN_ABBREVIATION_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Percentage in [0, 100], one decimal place.
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl MatchResult {
    fn perfect() -> Self {
        Self {
            score: 100.0,
            matched: Vec::new(),
            missing: Vec::new(),
        }
    }

    pub fn keyword_count(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}

/// Keyword scorer comparing resume skills with a job description.
///
/// Stateless; every call recomputes the job keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchScorer;

impl MatchScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score resume skill text against a job description. Never fails.
    pub fn score(&self, resume_skills: &str, job_description: &str) -> MatchResult {
        if job_description.trim().is_empty() {
            return MatchResult::perfect();
        }

        let job_keywords = extract_job_keywords(job_description);
        if job_keywords.is_empty() {
            return MatchResult::perfect();
        }

        let resume_tokens = extract_resume_skills(resume_skills);

        let (matched, missing): (Vec<String>, Vec<String>) = job_keywords
            .into_iter()
            .partition(|keyword| skill_matches(keyword, resume_tokens.as_slice()));

        let total = matched.len() + missing.len();
        let score = round_one_decimal(matched.len() as f64 / total as f64 * 100.0);

        MatchResult {
            score,
            matched,
            missing,
        }
    }
}

/// Requirement keywords found in a job description, lowercase and de-duplicated.
///
/// Order: technical skills, experience clause, education terms, process terms.
pub fn extract_job_keywords(job_description: &str) -> Vec<String> {
    let text = job_description.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();
    let mut push = |keyword: String| {
        if !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    };

    for skill in TECHNICAL_SKILL_MATCHER.find_in(&text) {
        push(skill.to_string());
    }

    // Only the first experience figure counts
    if let Some(caps) = EXPERIENCE_PATTERN.captures(&text) {
        push(format!("{}+ years experience", &caps[1]));
    }

    for term in EDUCATION_MATCHER.find_in(&text) {
        push(term.to_string());
    }

    for term in PROCESS_MATCHER.find_in(&text) {
        push(term.to_string());
    }

    keywords
}

/// Split resume skill text into lowercase tokens.
pub fn extract_resume_skills(skills_text: &str) -> Vec<String> {
    let lowered = skills_text.to_lowercase();
    let mut tokens: Vec<String> = Vec::new();

    for part in SKILL_SEPARATOR.split(&lowered) {
        let part = part.trim();
        if part.chars().count() > MIN_TOKEN_CHARS && !tokens.iter().any(|t| t == part) {
            tokens.push(part.to_string());
        }
    }

    tokens
}

/// Whether a job keyword is covered by any of the resume tokens.
pub fn skill_matches<S: AsRef<str>>(job_skill: &str, resume_skills: &[S]) -> bool {
    let job_skill = job_skill.trim().to_lowercase();

    resume_skills.iter().any(|resume_skill| {
        let resume_skill = resume_skill.as_ref().trim().to_lowercase();

        job_skill == resume_skill
            || resume_skill.contains(&job_skill)
            || job_skill.contains(&resume_skill)
            || is_abbreviation(&job_skill, &resume_skill)
    })
}

/// Literal prefix test standing in for abbreviation detection.
///
/// A single-word `short` of at least three characters abbreviates a
/// multi-word `long` when `long` starts with it. Acronyms such as "js" for
/// "javascript" are not recognized.
pub fn is_abbreviation(short: &str, long: &str) -> bool {
    if short.chars().count() < MIN_ABBREVIATION_CHARS {
        return false;
    }

    let short_words = short.split_whitespace().count();
    let long_words = long.split_whitespace().count();

    short_words == 1 && long_words > 1 && long.starts_with(short)
}

/// Round to one decimal place, ties to even.
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
