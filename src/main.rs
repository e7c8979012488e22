//! resume-ranker: resume field extraction and job description ranking

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction, JobSource};
use resume_ranker::config::{Config, OutputFormat};
use resume_ranker::input::InputManager;
use resume_ranker::output::report::SkippedDocument;
use resume_ranker::output::{
    save_report_to_file, suggest_filename, ExtractionReport, RankingReport, ReportGenerator,
};
use resume_ranker::processing::record::{NoNameOracle, RecordBuilder};
use resume_ranker::processing::ranker::SimilarityRanker;
use resume_ranker::store::{CorpusStore, CsvCorpusStore};
use resume_ranker::ResumeRankerError;
use std::path::Path;
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

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
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Extract {
            files,
            dry_run,
            store,
            output,
        } => {
            let format = output_format(output.as_deref(), &config)?;
            let store_path = store.unwrap_or_else(|| config.store.path.clone());
            let store = CsvCorpusStore::new(store_path.clone());

            let builder = RecordBuilder::with_catalog(config.heading_catalog()?)
                .context("Failed to build heading patterns")?;
            let mut input_manager = InputManager::new()
                .with_allowed_extensions(config.extraction.allowed_extensions.clone());

            let mut report = ExtractionReport::new(
                (!dry_run).then(|| store_path.display().to_string()),
            );

            let progress = if files.len() > 1 {
                let bar = ProgressBar::new(files.len() as u64);
                bar.set_style(
                    ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")?
                        .progress_chars("=> "),
                );
                Some(bar)
            } else {
                None
            };

            for file in &files {
                if let Some(bar) = &progress {
                    bar.set_message(file_name(file));
                }

                let text = input_manager
                    .extract_text(file)
                    .await
                    .with_context(|| format!("Failed to read {}", file.display()))?;

                match builder.build_with_oracle(&text, &file_name(file), &NoNameOracle) {
                    Ok(record) => {
                        if !dry_run {
                            store.append(&record)?;
                        }
                        report.records.push(record);
                    }
                    Err(ResumeRankerError::EmptyDocument(name)) => {
                        warn!("Skipping {}: no text extracted", name);
                        report.skipped.push(SkippedDocument {
                            file: name,
                            reason: "no text could be extracted".to_string(),
                        });
                    }
                    Err(e) => return Err(e.into()),
                }

                if let Some(bar) = &progress {
                    bar.inc(1);
                }
            }

            if let Some(bar) = progress {
                bar.finish_and_clear();
            }

            let generator = ReportGenerator::from_config(&config.output);
            println!("{}", generator.extraction(&report, format)?);
        }

        Commands::Rank {
            job,
            store,
            top,
            output,
            save,
        } => {
            let format = output_format(output.as_deref(), &config)?;
            let store = CsvCorpusStore::new(store.unwrap_or_else(|| config.store.path.clone()));
            let (job_source, job_text) = read_job(job, &config).await?;

            let start = Instant::now();
            let corpus = store.read_all().context("Failed to read the resume store")?;
            let entries = if job_text.trim().is_empty() {
                info!("Blank job description, nothing to rank");
                Vec::new()
            } else {
                SimilarityRanker::new()?.rank(&job_text, &corpus)
            };
            let elapsed = start.elapsed().as_millis() as u64;

            let report = RankingReport::new(
                &job_source,
                &job_text,
                corpus.len(),
                entries,
                elapsed,
                top.or(config.ranking.max_results),
            );

            let generator = ReportGenerator::from_config(&config.output);
            let content = generator.ranking(&report, format)?;

            match save {
                Some(path) => {
                    // files never carry terminal colors
                    let content = if format == OutputFormat::Console {
                        ReportGenerator::with_options(false, config.output.pretty_json)
                            .ranking(&report, format)?
                    } else {
                        content
                    };
                    let path = if path.is_dir() {
                        path.join(suggest_filename(format, &job_source, true))
                    } else {
                        path
                    };
                    save_report_to_file(&content, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Segment { file } => {
            let builder = RecordBuilder::with_catalog(config.heading_catalog()?)?;
            let mut input_manager = InputManager::new()
                .with_allowed_extensions(config.extraction.allowed_extensions.clone());
            let text = input_manager.extract_text(&file).await?;

            let segments = builder.segmenter().segment(&text);
            if segments.is_empty() {
                println!("No section headings found in {}", file.display());
            }
            for (section, block) in segments.iter() {
                if !block.is_empty() {
                    println!("== {} ==\n{}\n", section, block);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                println!("{}", content);
            }
            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn output_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(anyhow::Error::msg),
        None => Ok(config.output.format),
    }
}

async fn read_job(job: JobSource, config: &Config) -> Result<(String, String)> {
    match (job.job, job.text) {
        (Some(path), _) => {
            let mut input_manager = InputManager::new()
                .with_cache(false)
                .with_allowed_extensions(config.extraction.allowed_extensions.clone());
            let text = input_manager
                .extract_text(&path)
                .await
                .with_context(|| format!("Failed to read job description {}", path.display()))?;
            Ok((path.display().to_string(), text))
        }
        (None, Some(text)) => Ok(("inline".to_string(), text)),
        (None, None) => anyhow::bail!("Provide a job description with --job or --text"),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
