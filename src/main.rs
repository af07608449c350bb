//! Resume screener: resume field extraction and job description scoring

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_screener::cli::{self, Cli, Commands, ConfigAction, RecordsAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::output::formatter::{formatter_for, save_output_to_file, suggest_export_filename};
use resume_screener::processing::pipeline::ScreeningPipeline;
use resume_screener::storage::RecordStore;
use resume_screener::{DocumentExtractor, Result, ResumeScreenerError};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Parse { resume, output } => {
            let format = resolve_format(output.as_deref(), &config)?;

            let extractor = DocumentExtractor::from_config(&config.extraction);
            let profile = extractor.parse_path(&resume)?;

            let formatter = formatter_for(format, config.output.color_output);
            println!("{}", formatter.format_profile(&display_name(&resume), &profile)?);
        }

        Commands::Screen {
            resumes,
            job,
            job_text,
            output,
            no_save,
            detailed,
            save,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let job_description = match (job, job_text) {
                (Some(path), _) => {
                    cli::validate_file_extension(&path, &["txt", "md"]).map_err(|e| {
                        ResumeScreenerError::InvalidInput(format!("Job description file: {}", e))
                    })?;
                    std::fs::read_to_string(&path)?
                }
                (None, Some(text)) => text,
                (None, None) => {
                    info!("No job description given, every resume scores 100%");
                    String::new()
                }
            };

            let progress = ProgressBar::new(resumes.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .map_err(|e| ResumeScreenerError::Processing(e.to_string()))?
                    .progress_chars("=> "),
            );
            progress.set_message("screening resumes");

            let mut pipeline = ScreeningPipeline::from_config(&config).with_progress(progress.clone());
            if !no_save {
                pipeline = pipeline.with_store(RecordStore::new(&config.storage.records_path));
            }

            let report = pipeline.screen(&resumes, &job_description).await;
            progress.finish_and_clear();

            let formatter = formatter_for(format, config.output.color_output);
            let rendered = formatter.format_batch(&report, detailed)?;
            println!("{}", rendered);

            if let Some(path) = save {
                save_output_to_file(&rendered, &path)?;
                info!("Saved results to {}", path.display());
            }
        }

        Commands::Records { action } => {
            let store = RecordStore::new(&config.storage.records_path);
            match action {
                RecordsAction::List { output } => {
                    let format = resolve_format(output.as_deref(), &config)?;
                    let formatter = formatter_for(format, config.output.color_output);
                    println!("{}", formatter.format_records(&store.list()?)?);
                }

                RecordsAction::Stats { output } => {
                    let format = resolve_format(output.as_deref(), &config)?;
                    let formatter = formatter_for(format, config.output.color_output);
                    let stats = store.stats(config.scoring.high_score_threshold)?;
                    println!("{}", formatter.format_stats(&stats)?);
                }

                RecordsAction::Export { dest } => {
                    let dest = dest.unwrap_or_else(|| PathBuf::from(suggest_export_filename(true)));
                    let bytes = store.export(&dest)?;
                    println!("✅ Exported {} bytes to {}", bytes, dest.display());
                }

                RecordsAction::Clear => {
                    if store.clear()? {
                        println!("✅ All resume data cleared");
                    } else {
                        println!("💡 No resume data to clear");
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    ResumeScreenerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut updated = config.clone();
                updated.set_value(&key, &value)?;
                updated.save_to(config_path)?;
                println!("✅ Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(ResumeScreenerError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
