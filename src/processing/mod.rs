//! Profile extraction, keyword scoring and batch screening

pub mod ats_matcher;
pub mod name_finder;
pub mod pipeline;
pub mod profile;
pub mod vocabulary;
