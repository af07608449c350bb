//! Resume screener library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod storage;

pub use config::Config;
pub use error::{Result, ResumeScreenerError};
pub use input::{DocumentFormat, RawDocument};
pub use processing::ats_matcher::{MatchResult, MatchScorer};
pub use processing::profile::{DocumentExtractor, ExtractedProfile, NOT_FOUND};
