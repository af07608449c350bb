//! CLI interface for the resume screener

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Resume field extraction and job description scoring")]
#[command(long_about = "Extract name, email, phone and skills from PDF, DOCX and TXT resumes, score them against a job description and keep a shortlist of screened candidates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract profile fields from a single resume
    Parse {
        /// Path to resume file (PDF, DOCX, TXT)
        resume: PathBuf,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Screen one or more resumes against a job description
    Screen {
        /// Resume files to screen
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Path to job description file
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Do not write results to the records file
        #[arg(long)]
        no_save: bool,

        /// Show matched and missing keywords per resume
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Stored candidate records
    Records {
        #[command(subcommand)]
        action: RecordsAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum RecordsAction {
    /// List all stored candidates
    List {
        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show aggregate statistics
    Stats {
        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Copy the records file to another location
    Export {
        /// Destination file (defaults to a timestamped name in the current directory)
        dest: Option<PathBuf>,
    },

    /// Delete all stored records
    Clear,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "processing.max_concurrent")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
