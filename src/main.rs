//! Resume ranker: rank candidate resumes against a job description

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction, DOCUMENT_EXTENSIONS};
use resume_ranker::input::InputManager;
use resume_ranker::output::formatter::{save_report_to_file, OutputFormat, ReportGenerator};
use resume_ranker::{Config, MatchingEngine, MatchingSession, Result, ResumeRankerError};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Rank {
            job,
            resumes,
            output,
            text_output,
            max_features,
            top,
        } => {
            if let Some(max_features) = max_features {
                config.vectorizer.max_features = Some(max_features);
            }
            if let Some(top) = top {
                config.output.summary_candidates = top;
            }
            config.validate()?;

            let json_path = output.unwrap_or_else(|| config.output.json_path.clone());
            let text_path = text_output.unwrap_or_else(|| config.output.text_path.clone());

            run_ranking(&config, &job, &resumes, &json_path, &text_path).await
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ResumeRankerError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("# {}\n", path.display());
                    println!("{}", content);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset: {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
            Ok(())
        }
    }
}

async fn run_ranking(
    config: &Config,
    job: &Path,
    resumes: &[PathBuf],
    json_path: &Path,
    text_path: &Path,
) -> Result<()> {
    cli::validate_file_extension(job, DOCUMENT_EXTENSIONS)
        .map_err(|e| ResumeRankerError::InvalidInput(format!("Job description file: {}", e)))?;

    let mut input_manager = InputManager::new();
    let mut session = MatchingSession::new(MatchingEngine::new(config)?);

    info!("Loading job description: {}", job.display());
    let job_text = input_manager.extract_text(job).await?;
    let processed = session.process_job(&job_text);
    info!(
        "{} ({} normalized characters)",
        processed.message, processed.preprocessed_length
    );

    let progress = ProgressBar::new(resumes.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut documents = Vec::with_capacity(resumes.len());
    for path in resumes {
        progress.set_message(path.display().to_string());
        match input_manager.load_document(path).await {
            Ok(document) => documents.push(document),
            Err(e) => progress.suspend(|| warn!("Skipping resume {}: {}", path.display(), e)),
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    if documents.is_empty() {
        return Err(ResumeRankerError::InvalidInput(
            "no resumes could be loaded".to_string(),
        ));
    }
    info!("Loaded {} of {} resumes", documents.len(), resumes.len());

    let outcome = session.rank_candidates(&documents)?;

    let generator = ReportGenerator::with_options(
        config.output.pretty_json,
        config.output.color_output,
        config.output.summary_candidates,
    );

    let json = generator.generate_report(&outcome.report, OutputFormat::Json)?;
    save_report_to_file(&json, json_path)?;
    save_report_to_file(&outcome.text_report, text_path)?;

    println!("{}", generator.generate_report(&outcome.report, OutputFormat::Console)?);
    println!("JSON report: {}", json_path.display());
    println!("Text report: {}", text_path.display());

    Ok(())
}
