//! Output formatters for console and JSON presentation

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::pipeline::{BatchReport, ScreeningOutcome};
use crate::processing::profile::ExtractedProfile;
use crate::storage::{CandidateRecord, RecordStats};
use colored::{Color, Colorize};
use serde_json::json;
use std::path::Path;

/// Trait for rendering command results
pub trait OutputFormatter {
    fn format_profile(&self, filename: &str, profile: &ExtractedProfile) -> Result<String>;
    fn format_batch(&self, report: &BatchReport, detailed: bool) -> Result<String>;
    fn format_records(&self, records: &[CandidateRecord]) -> Result<String>;
    fn format_stats(&self, stats: &RecordStats) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

pub fn formatter_for(format: OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = if score >= 80.0 {
            ("STRONG", Color::Green)
        } else if score >= 50.0 {
            ("PARTIAL", Color::Yellow)
        } else {
            ("WEAK", Color::Red)
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_field(&self, label: &str, value: &str, found: bool) -> String {
        let value = if found {
            value.to_string()
        } else {
            self.colorize(value, Color::BrightBlack)
        };
        format!("  {:<8} {}\n", format!("{}:", label), value)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_profile(&self, filename: &str, profile: &ExtractedProfile) -> Result<String> {
        let mut output = self.format_header(&format!("📄 {}", filename));
        output.push_str(&self.format_field("Name", &profile.name, profile.has_name()));
        output.push_str(&self.format_field("Email", &profile.email, profile.has_email()));
        output.push_str(&self.format_field("Phone", &profile.phone, profile.has_phone()));
        output.push_str(&self.format_field("Skills", &profile.skills, !profile.skill_list().is_empty()));
        Ok(output)
    }

    fn format_batch(&self, report: &BatchReport, detailed: bool) -> Result<String> {
        let mut output = self.format_header("📊 SCREENING RESULTS");

        for outcome in &report.results {
            match outcome {
                ScreeningOutcome::Saved(r) | ScreeningOutcome::Scored(r) => {
                    let status = match outcome {
                        ScreeningOutcome::Saved(_) => "saved",
                        _ => "scored",
                    };
                    output.push_str(&format!(
                        "✅ {} - {} <{}> {:.1}% {} ({})\n",
                        r.filename,
                        r.name,
                        r.email,
                        r.match_score,
                        self.format_score_badge(r.match_score),
                        status
                    ));
                    if detailed {
                        if !r.matched_skills.is_empty() {
                            output.push_str(&format!(
                                "    matched: {}\n",
                                self.colorize(&r.matched_skills.join(", "), Color::Green)
                            ));
                        }
                        if !r.missing_skills.is_empty() {
                            output.push_str(&format!(
                                "    missing: {}\n",
                                self.colorize(&r.missing_skills.join(", "), Color::Yellow)
                            ));
                        }
                    }
                }
                ScreeningOutcome::Error(f) => {
                    output.push_str(&format!("❌ {} - {}\n", f.filename, self.colorize(&f.error, Color::Red)));
                }
                ScreeningOutcome::Rejected(f) => {
                    output.push_str(&format!("⚠️  {} - {}\n", f.filename, self.colorize(&f.error, Color::Yellow)));
                }
            }
        }

        output.push('\n');
        output.push_str(&self.colorize(&report.summary.message, Color::Cyan));
        output.push('\n');
        Ok(output)
    }

    fn format_records(&self, records: &[CandidateRecord]) -> Result<String> {
        let mut output = self.format_header(&format!("🗂  STORED CANDIDATES ({})", records.len()));
        if records.is_empty() {
            output.push_str("No resumes stored yet.\n");
            return Ok(output);
        }

        output.push_str(&format!(
            "{:<25} {:<32} {:<18} {:>9}\n",
            "Name", "Email", "Phone Number", "ATS Score"
        ));
        for record in records {
            output.push_str(&format!(
                "{:<25} {:<32} {:<18} {:>9}\n",
                record.name, record.email, record.phone_number, record.ats_score
            ));
        }
        Ok(output)
    }

    fn format_stats(&self, stats: &RecordStats) -> Result<String> {
        let mut output = self.format_header("📈 RECORD STATISTICS");
        output.push_str(&format!("  Total resumes:     {}\n", stats.total_resumes));
        output.push_str(&format!(
            "  Average score:     {:.1}% {}\n",
            stats.average_score,
            self.format_score_badge(stats.average_score)
        ));
        output.push_str(&format!("  High scores:       {}\n", stats.high_score_count));
        output.push_str(&format!("  Records file:      {}\n", stats.records_file.display()));
        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_profile(&self, filename: &str, profile: &ExtractedProfile) -> Result<String> {
        self.render(&json!({
            "filename": filename,
            "name": profile.name,
            "email": profile.email,
            "phone": profile.phone,
            "skills": profile.skills,
            "skill_count": profile.skill_list().len(),
        }))
    }

    fn format_batch(&self, report: &BatchReport, _detailed: bool) -> Result<String> {
        self.render(&json!({
            "success": true,
            "results": report.results,
            "summary": report.summary,
        }))
    }

    fn format_records(&self, records: &[CandidateRecord]) -> Result<String> {
        self.render(&json!({ "success": true, "resumes": records }))
    }

    fn format_stats(&self, stats: &RecordStats) -> Result<String> {
        self.render(stats)
    }
}

/// Default file name for an exported shortlist.
pub fn suggest_export_filename(timestamp: bool) -> String {
    if timestamp {
        format!("resume_shortlist_{}.csv", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        "resume_shortlist.csv".to_string()
    }
}

pub fn save_output_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::pipeline::{BatchSummary, FailedResume, ScoredResume};
    use crate::processing::profile::NOT_FOUND;

    fn sample_report() -> BatchReport {
        BatchReport {
            results: vec![
                ScreeningOutcome::Saved(ScoredResume {
                    filename: "jane.pdf".to_string(),
                    name: "Jane Doe".to_string(),
                    email: "jane@example.com".to_string(),
                    phone: NOT_FOUND.to_string(),
                    match_score: 80.0,
                    matched_skills: vec!["python".to_string()],
                    missing_skills: vec!["3+ years experience".to_string()],
                }),
                ScreeningOutcome::Rejected(FailedResume {
                    filename: "cv.odt".to_string(),
                    error: "Invalid file type".to_string(),
                }),
            ],
            summary: BatchSummary {
                total_files: 2,
                saved_count: 1,
                rejected_count: 1,
                message: "Processed 2 resumes: 1 saved, 1 rejected".to_string(),
            },
        }
    }

    #[test]
    fn test_console_batch_output() {
        let output = ConsoleFormatter::new(false).format_batch(&sample_report(), true).unwrap();
        assert!(output.contains("jane.pdf - Jane Doe <jane@example.com> 80.0% [STRONG] (saved)"));
        assert!(output.contains("missing: 3+ years experience"));
        assert!(output.contains("cv.odt - Invalid file type"));
        assert!(output.contains("Processed 2 resumes: 1 saved, 1 rejected"));
    }

    #[test]
    fn test_json_batch_output() {
        let output = JsonFormatter::new(false).format_batch(&sample_report(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["results"][0]["status"], "Saved");
        assert_eq!(value["results"][0]["match_score"], 80.0);
        assert_eq!(value["results"][1]["status"], "Rejected");
        assert_eq!(value["summary"]["saved_count"], 1);
    }

    #[test]
    fn test_console_profile_output() {
        let profile = ExtractedProfile {
            name: "Jane Doe".to_string(),
            email: NOT_FOUND.to_string(),
            phone: "555-123-4567".to_string(),
            skills: "Python, Docker".to_string(),
        };
        let output = ConsoleFormatter::new(false).format_profile("jane.txt", &profile).unwrap();
        assert!(output.contains("Name:    Jane Doe"));
        assert!(output.contains("Email:   Not found"));
        assert!(output.contains("Skills:  Python, Docker"));
    }

    #[test]
    fn test_json_profile_output() {
        let profile = ExtractedProfile {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: NOT_FOUND.to_string(),
            skills: NOT_FOUND.to_string(),
        };
        let output = JsonFormatter::new(false).format_profile("jane.txt", &profile).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["phone"], "Not found");
        assert_eq!(value["skill_count"], 0);
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(suggest_export_filename(false), "resume_shortlist.csv");
        let stamped = suggest_export_filename(true);
        assert!(stamped.starts_with("resume_shortlist_") && stamped.ends_with(".csv"));
    }
}
