//! Flat CSV store of screened candidates, keyed by email

use crate::error::{Result, ResumeScreenerError};
use crate::processing::ats_matcher::round_one_decimal;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Column headers, in file order.
pub const RECORD_HEADERS: [&str; 4] = ["Name", "Email", "Phone Number", "ATS Score"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    /// Score rendered as a percentage, e.g. `"66.7%"`.
    #[serde(rename = "ATS Score")]
    pub ats_score: String,
}

impl CandidateRecord {
    pub fn new(name: &str, email: &str, phone_number: &str, score: f64) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            phone_number: phone_number.to_string(),
            ats_score: format_score(score),
        }
    }

    /// Numeric score, if the stored text parses.
    pub fn score_value(&self) -> Option<f64> {
        self.ats_score.trim().trim_end_matches('%').trim().parse().ok()
    }
}

pub fn format_score(score: f64) -> String {
    format!("{:.1}%", score)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordStats {
    pub total_resumes: usize,
    pub average_score: f64,
    pub high_score_count: usize,
    pub records_file: PathBuf,
}

pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Update the row with the same email, or append a new one.
    ///
    /// A file with unexpected headers or unreadable rows is replaced by a
    /// file holding only `record`.
    pub fn upsert(&self, record: CandidateRecord) -> Result<UpsertOutcome> {
        let mut records = if self.exists() {
            match self.read_records() {
                Ok(records) => records,
                Err(e) => {
                    warn!(
                        "Records file {} is unreadable ({}), recreating it",
                        self.path.display(),
                        e
                    );
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let mut outcome = UpsertOutcome::Inserted;
        for existing in records.iter_mut().filter(|r| r.email == record.email) {
            existing.name = record.name.clone();
            existing.phone_number = record.phone_number.clone();
            existing.ats_score = record.ats_score.clone();
            outcome = UpsertOutcome::Updated;
        }

        match outcome {
            UpsertOutcome::Updated => info!("Updated existing resume for {}", record.name),
            UpsertOutcome::Inserted => {
                info!("Added new resume for {}", record.name);
                records.push(record);
            }
        }

        self.write_records(&records)?;
        Ok(outcome)
    }

    /// All stored records; empty when nothing has been saved yet.
    pub fn list(&self) -> Result<Vec<CandidateRecord>> {
        if !self.exists() {
            return Ok(Vec::new());
        }
        self.read_records()
    }

    pub fn stats(&self, high_score_threshold: f64) -> Result<RecordStats> {
        let records = self.list()?;

        let scores: Vec<f64> = records
            .iter()
            .filter_map(|r| {
                let value = r.score_value();
                if value.is_none() {
                    warn!("Skipping unparsable score '{}' for {}", r.ats_score, r.email);
                }
                value
            })
            .collect();

        let average_score = if scores.is_empty() {
            0.0
        } else {
            round_one_decimal(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        Ok(RecordStats {
            total_resumes: records.len(),
            average_score,
            high_score_count: scores.iter().filter(|s| **s >= high_score_threshold).count(),
            records_file: self.path.clone(),
        })
    }

    /// Copy the records file to `dest`, returning the number of bytes copied.
    pub fn export(&self, dest: &Path) -> Result<u64> {
        if !self.exists() {
            return Err(ResumeScreenerError::Storage(
                "No resume data found".to_string(),
            ));
        }
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = std::fs::copy(&self.path, dest)?;
        info!("Exported records to {}", dest.display());
        Ok(bytes)
    }

    /// Remove all records. Returns whether there was anything to remove.
    pub fn clear(&self) -> Result<bool> {
        if !self.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)?;
        info!("Cleared records file {}", self.path.display());
        Ok(true)
    }

    fn read_records(&self) -> Result<Vec<CandidateRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)?;

        let headers = reader.headers()?;
        if headers.iter().ne(RECORD_HEADERS.iter().copied()) {
            return Err(ResumeScreenerError::Storage(format!(
                "unexpected columns: {}",
                headers.iter().collect::<Vec<_>>().join(", ")
            )));
        }

        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<CandidateRecord>, csv::Error>>()?;
        debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn write_records(&self, records: &[CandidateRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        // Write next to the target, then rename over it
        let tmp_path = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&tmp_path)?;
            writer.write_record(RECORD_HEADERS)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
