//! Batch screening: extract, score and store many resumes at once

use crate::config::Config;
use crate::error::{Result, ResumeScreenerError};
use crate::input::DocumentFormat;
use crate::processing::ats_matcher::MatchScorer;
use crate::processing::profile::DocumentExtractor;
use crate::storage::{CandidateRecord, RecordStore};
use anyhow::anyhow;
use indicatif::ProgressBar;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResume {
    pub filename: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub match_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedResume {
    pub filename: String,
    pub error: String,
}

/// Result record for one file of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ScreeningOutcome {
    /// Scored and written to the record store.
    Saved(ScoredResume),
    /// Scored without being stored.
    Scored(ScoredResume),
    /// The document could not be processed.
    Error(FailedResume),
    /// The file type is not accepted.
    Rejected(FailedResume),
}

impl ScreeningOutcome {
    pub fn filename(&self) -> &str {
        match self {
            ScreeningOutcome::Saved(r) | ScreeningOutcome::Scored(r) => &r.filename,
            ScreeningOutcome::Error(f) | ScreeningOutcome::Rejected(f) => &f.filename,
        }
    }

    pub fn scored(&self) -> Option<&ScoredResume> {
        match self {
            ScreeningOutcome::Saved(r) | ScreeningOutcome::Scored(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.scored().is_some()
    }

    fn error(filename: String, error: impl ToString) -> Self {
        ScreeningOutcome::Error(FailedResume {
            filename,
            error: format!("Error processing: {}", error.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_files: usize,
    pub saved_count: usize,
    pub rejected_count: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<ScreeningOutcome>,
    pub summary: BatchSummary,
}

/// Runs extraction and scoring for a batch of files concurrently.
///
/// Results come back in input order. A failing document never aborts the
/// rest of the batch.
pub struct ScreeningPipeline {
    extractor: Arc<DocumentExtractor>,
    scorer: MatchScorer,
    store: Option<RecordStore>,
    max_concurrent: usize,
    document_timeout: Duration,
    progress: Option<ProgressBar>,
}

impl ScreeningPipeline {
    pub fn new(extractor: DocumentExtractor) -> Self {
        Self {
            extractor: Arc::new(extractor),
            scorer: MatchScorer::new(),
            store: None,
            max_concurrent: 4,
            document_timeout: Duration::from_secs(30),
            progress: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(DocumentExtractor::from_config(&config.extraction))
            .with_concurrency(config.processing.max_concurrent)
            .with_timeout(Duration::from_secs(config.processing.document_timeout_secs))
    }

    pub fn with_store(mut self, store: RecordStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_concurrency(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.document_timeout = timeout;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub async fn screen(&self, files: &[PathBuf], job_description: &str) -> BatchReport {
        info!(
            "Screening {} files ({} at a time)",
            files.len(),
            self.max_concurrent
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let job: Arc<str> = Arc::from(job_description);
        let mut slots: Vec<Option<ScreeningOutcome>> = vec![None; files.len()];
        let mut tasks = JoinSet::new();

        for (index, path) in files.iter().enumerate() {
            let filename = display_name(path);

            if !DocumentFormat::is_supported_path(path) {
                warn!("Rejected {}: invalid file type", filename);
                slots[index] = Some(ScreeningOutcome::Rejected(FailedResume {
                    filename,
                    error: "Invalid file type".to_string(),
                }));
                self.tick();
                continue;
            }

            let extractor = Arc::clone(&self.extractor);
            let scorer = self.scorer;
            let job = Arc::clone(&job);
            let semaphore = Arc::clone(&semaphore);
            let path = path.clone();
            let timeout = self.document_timeout;

            tasks.spawn(async move {
                let permit = semaphore.acquire_owned().await;
                let task_filename = filename.clone();
                let work = tokio::task::spawn_blocking(move || {
                    // The slot stays taken until extraction returns, even after a timeout
                    let _permit = permit;
                    screen_document(&extractor, scorer, &path, task_filename, &job)
                });

                let result = match tokio::time::timeout(timeout, work).await {
                    Ok(Ok(result)) => result,
                    Ok(Err(join_error)) => Err(anyhow!("document task failed: {}", join_error).into()),
                    Err(_) => Err(ResumeScreenerError::Timeout(timeout)),
                };
                (index, filename, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            self.tick();
            match joined {
                Ok((index, filename, Ok(scored))) => {
                    debug!("{} scored {:.1}%", filename, scored.match_score);
                    slots[index] = Some(ScreeningOutcome::Scored(scored));
                }
                Ok((index, filename, Err(e))) => {
                    error!("Failed to process {}: {}", filename, e);
                    slots[index] = Some(ScreeningOutcome::error(filename, e));
                }
                Err(e) => error!("Screening task aborted: {}", e),
            }
        }

        let results: Vec<ScreeningOutcome> = slots
            .into_iter()
            .zip(files)
            .map(|(slot, path)| {
                let outcome = slot.unwrap_or_else(|| {
                    ScreeningOutcome::error(display_name(path), "task aborted")
                });
                self.persist(outcome)
            })
            .collect();

        let summary = self.summarize(&results);
        info!("{}", summary.message);
        BatchReport { results, summary }
    }

    fn persist(&self, outcome: ScreeningOutcome) -> ScreeningOutcome {
        let (store, scored) = match (&self.store, outcome) {
            (Some(store), ScreeningOutcome::Scored(scored)) => (store, scored),
            (_, other) => return other,
        };

        let record =
            CandidateRecord::new(&scored.name, &scored.email, &scored.phone, scored.match_score);

        match store.upsert(record) {
            Ok(_) => ScreeningOutcome::Saved(scored),
            Err(e) => {
                error!("Failed to save {}: {}", scored.filename, e);
                ScreeningOutcome::error(scored.filename, e)
            }
        }
    }

    fn summarize(&self, results: &[ScreeningOutcome]) -> BatchSummary {
        let total_files = results.len();
        let saved_count = results.iter().filter(|r| r.is_success()).count();
        let rejected_count = total_files - saved_count;
        let verb = if self.store.is_some() { "saved" } else { "scored" };

        BatchSummary {
            total_files,
            saved_count,
            rejected_count,
            message: format!(
                "Processed {} resumes: {} {}, {} rejected",
                total_files, saved_count, verb, rejected_count
            ),
        }
    }

    fn tick(&self) {
        if let Some(progress) = &self.progress {
            progress.inc(1);
        }
    }
}

fn screen_document(
    extractor: &DocumentExtractor,
    scorer: MatchScorer,
    path: &Path,
    filename: String,
    job_description: &str,
) -> Result<ScoredResume> {
    let profile = extractor.parse_path(path)?;
    if !profile.has_email() {
        warn!("{}: no email found, its record is keyed as \"{}\"", filename, profile.email);
    }
    let result = scorer.score(&profile.skills, job_description);

    Ok(ScoredResume {
        filename,
        name: profile.name,
        email: profile.email,
        phone: profile.phone,
        match_score: result.score,
        matched_skills: result.matched,
        missing_skills: result.missing,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::name_finder::NameFinder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_results_keep_input_order_and_isolate_failures() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write(dir.path(), "jane.txt", b"Jane Doe\njane@example.com\nPython, Flask"),
            write(dir.path(), "photo.png", b"\x89PNG"),
            write(dir.path(), "broken.docx", b"not a docx"),
            write(dir.path(), "john.txt", b"John Roe\njohn@example.com\nJava"),
        ];

        let pipeline = ScreeningPipeline::new(DocumentExtractor::default()).with_concurrency(2);
        let report = pipeline.screen(&files, "Python developer").await;

        let names: Vec<&str> = report.results.iter().map(|r| r.filename()).collect();
        assert_eq!(names, vec!["jane.txt", "photo.png", "broken.docx", "john.txt"]);

        assert!(matches!(report.results[0], ScreeningOutcome::Scored(_)));
        assert!(matches!(report.results[1], ScreeningOutcome::Rejected(_)));
        assert!(matches!(report.results[2], ScreeningOutcome::Error(_)));
        assert!(matches!(report.results[3], ScreeningOutcome::Scored(_)));

        let jane = report.results[0].scored().unwrap();
        assert_eq!(jane.email, "jane@example.com");
        assert_eq!(jane.match_score, 100.0);

        assert_eq!(report.summary.total_files, 4);
        assert_eq!(report.summary.saved_count, 2);
        assert_eq!(report.summary.rejected_count, 2);
        assert_eq!(report.summary.message, "Processed 4 resumes: 2 scored, 2 rejected");
    }

    #[tokio::test]
    async fn test_successful_results_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![write(
            dir.path(),
            "jane.txt",
            b"Jane Doe\njane@example.com\n555-123-4567\nPython, Docker",
        )];
        let store_path = dir.path().join("records.csv");

        let pipeline = ScreeningPipeline::new(DocumentExtractor::default())
            .with_store(RecordStore::new(&store_path));
        let report = pipeline.screen(&files, "Python and Kubernetes").await;

        let ScreeningOutcome::Saved(saved) = &report.results[0] else {
            panic!("expected saved outcome, got {:?}", report.results[0]);
        };
        assert_eq!(saved.matched_skills, vec!["python"]);
        assert_eq!(saved.missing_skills, vec!["kubernetes"]);

        let records = RecordStore::new(&store_path).list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].phone_number, "555-123-4567");
        assert_eq!(records[0].ats_score, "50.0%");
    }

    /// Name finder that sleeps and records how many calls overlap.
    struct SlowNameFinder {
        delay: Duration,
        active: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    impl NameFinder for SlowNameFinder {
        fn find_name(&self, _text: &str) -> Option<String> {
            let running = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(running, Ordering::SeqCst);
            std::thread::sleep(self.delay);
            self.active.fetch_sub(1, Ordering::SeqCst);
            None
        }

        fn strategy(&self) -> &'static str {
            "slow"
        }
    }

    #[tokio::test]
    async fn test_timed_out_documents_keep_their_slot() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write(dir.path(), "a.txt", b"Jane Doe\njane@example.com"),
            write(dir.path(), "b.txt", b"John Roe\njohn@example.com"),
        ];

        let peak = Arc::new(AtomicUsize::new(0));
        let finder = SlowNameFinder {
            delay: Duration::from_millis(300),
            active: Arc::new(AtomicUsize::new(0)),
            peak: Arc::clone(&peak),
        };

        let pipeline = ScreeningPipeline::new(DocumentExtractor::new(Box::new(finder)))
            .with_concurrency(1)
            .with_timeout(Duration::from_millis(50));
        let report = pipeline.screen(&files, "Python").await;

        for outcome in &report.results {
            let ScreeningOutcome::Error(failed) = outcome else {
                panic!("expected timeout error, got {:?}", outcome);
            };
            assert!(failed.error.starts_with("Error processing: Timed out after"));
        }
        assert_eq!(report.summary.rejected_count, 2);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_outcome_serialization_carries_status() {
        let outcome = ScreeningOutcome::Rejected(FailedResume {
            filename: "cv.odt".to_string(),
            error: "Invalid file type".to_string(),
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "Rejected");
        assert_eq!(json["filename"], "cv.odt");
        assert_eq!(json["error"], "Invalid file type");
    }
}
