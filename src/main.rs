//! resume-match: resume vs job description similarity and skill gap tool

use clap::Parser;
use indicatif::ProgressBar;
use log::{error, info, warn};
use resume_match::cli::{self, Cli, Commands, ConfigAction};
use resume_match::config::Config;
use resume_match::input::file_detector::DocumentFormat;
use resume_match::input::InputManager;
use resume_match::output::formatter::ReportGenerator;
use resume_match::output::report::AnalysisReport;
use resume_match::{Document, DocumentInput, DocumentType, MatchReport, Result, ResumeMatchError};
use std::path::Path;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    if let Err(e) = run_command(cli.command, &config_path).await {
        error!("{}", e);
        process::exit(1);
    }
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load_or_init(path).map_err(|e| {
        warn!("Run `resume-match config reset` to restore the defaults at {}", path.display());
        e
    })
}

async fn load_document(
    manager: &InputManager,
    path: &Path,
    mime_type: Option<&str>,
    document_type: DocumentType,
) -> Result<Document> {
    match mime_type {
        Some(mime_type) => manager.load_with_mime_type(path, mime_type, document_type).await,
        None => {
            cli::validate_file_extension(path, DocumentFormat::extensions()).map_err(|e| {
                ResumeMatchError::UnsupportedFormat {
                    input: document_type,
                    format: e,
                }
            })?;
            manager.load(path, document_type).await
        }
    }
}

async fn run_command(command: Commands, config_path: &Path) -> Result<()> {
    match command {
        Commands::Align {
            resume,
            job,
            job_text,
            resume_type,
            job_type,
            detailed,
            output,
            save,
            no_color,
        } => {
            let config = load_config(config_path)?;

            if let Some(job) = &job {
                if job_text.is_some() {
                    warn!("Both a job file and job text were given; using {}", job.display());
                }
            }

            let output_format = match output {
                Some(output) => cli::parse_output_format(&output).map_err(ResumeMatchError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;
            let use_colors = config.output.color_output && !no_color && save.is_none();

            let input_manager = InputManager::new();
            let resume_doc =
                load_document(&input_manager, &resume, resume_type.as_deref(), DocumentType::Resume).await?;
            let job_doc = match &job {
                Some(path) => Some(
                    load_document(&input_manager, path, job_type.as_deref(), DocumentType::JobDescription).await?,
                ),
                None => None,
            };
            let resume_source = resume_doc.source().unwrap_or("resume").to_string();
            let job_source = job_doc
                .as_ref()
                .and_then(|doc| doc.source())
                .unwrap_or("pasted text")
                .to_string();

            let vocabulary = config.vocabulary();
            let report = MatchReport::new(&vocabulary);

            let spinner = ProgressBar::new_spinner();
            spinner.set_message("Analyzing... Please wait!");
            spinner.enable_steady_tick(Duration::from_millis(100));
            let analysis = report.analyze(
                Some(DocumentInput::Document(resume_doc)),
                DocumentInput::resolve(job_doc, job_text),
            );
            spinner.finish_and_clear();
            let analysis = analysis?;

            let report = AnalysisReport::new(&analysis, &resume_source, &job_source, &config);
            let generator = ReportGenerator::new(use_colors, detailed);
            let rendered = generator.generate(&report, output_format)?;

            match save {
                Some(path) => generator.save(&rendered, &path)?,
                None => println!("{}", rendered),
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let config = load_config(config_path)?;
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeMatchError::Configuration(e.to_string()))?;
                println!("# {}\n{}", config_path.display(), content);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                Config::reset(config_path)?;
                info!("Configuration reset: {}", config_path.display());
            }
        },
    }

    Ok(())
}
