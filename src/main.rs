//! Resume analyzer: compare a resume with a job description

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction};
use resume_analyzer::config::{Config, OutputFormat};
use resume_analyzer::error::{AnalyzerError, Result};
use resume_analyzer::output::formatter::{save_report_to_file, ReportGenerator};
use resume_analyzer::output::report::title_case;
use resume_analyzer::processing::analyzer::AnalysisEngine;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("{}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_file: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            job,
            resume,
            output,
            save,
            detailed,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(AnalyzerError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            info!("Starting resume analysis");
            let mut engine = AnalysisEngine::from_config(&config)?;

            let spinner = (output_format == OutputFormat::Console).then(analysis_spinner);
            let outcome = engine.analyze_files(job.as_deref(), resume.as_deref()).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            let report = outcome?;

            // Colors never go into saved files.
            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed);
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Skills => {
            let vocabulary = config.vocabulary();
            println!("Skill vocabulary ({} skills)\n", vocabulary.len());
            for phrase in vocabulary.phrases() {
                println!("  • {}", title_case(phrase));
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Current Configuration\n");
                print!("{}", config.to_toml()?);
            }

            Some(ConfigAction::Reset) => {
                let path = config_file.unwrap_or_else(Config::config_path);
                Config::default().save_to(&path)?;
                println!("Configuration reset to defaults: {}", path.display());
            }

            Some(ConfigAction::Path) => {
                let path = config_file.unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }
        },
    }

    Ok(())
}

fn analysis_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Analyzing documents...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
