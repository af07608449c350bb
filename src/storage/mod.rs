//! Persistence of screened candidates

pub mod records;

pub use records::{CandidateRecord, RecordStats, RecordStore, UpsertOutcome};
