//! Redub - Automated Video Dubbing Workflow
//!
//! Entry point for the command line and the HTTP server.

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use redub::cli::{Args, Commands};
use redub::config::Config;
use redub::server;
use redub::workflow::{JobRequest, Workflow};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;
    info!("Starting Redub - Automated Video Dubbing Workflow");

    dotenvy::dotenv().ok();

    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if std::path::Path::new("redub.toml").exists() {
                info!("Found redub.toml in current directory, loading...");
                Config::from_file("redub.toml")?
            } else {
                Config::default()
            }
        }
    };
    config.apply_env();

    match args.command {
        Commands::InitConfig { output } => {
            config.save_to_file(&output)?;
            println!("Wrote default configuration to {}", output.display());
        }
        Commands::Check => {
            let workflow = Workflow::new(config)?;
            let version = workflow.check_dependencies().await?;
            println!("ffmpeg: {}", version);
            println!("speech-to-text key: set");
        }
        Commands::Extract { input, output } => {
            let workflow = Workflow::new(config)?;
            workflow.extract_audio(&input, &output).await?;
            println!("Extracted audio to {}", output.display());
        }
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            let workflow = Workflow::new(config)?;
            if let Err(e) = workflow.check_dependencies().await {
                warn!("Dependency check failed, requests will fail until fixed: {}", e);
            }
            server::serve(workflow).await?;
        }
        Commands::Translate { input, output, target_lang, source_lang } => {
            let workflow = Workflow::new(config)?;

            let video = tokio::fs::read(&input).await?;
            let mut request = JobRequest::new(video)
                .with_file_name(input.to_string_lossy());
            request.target_language = target_lang;
            request.source_language = source_lang;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")?);
            spinner.set_message(format!("Dubbing {}", input.display()));
            spinner.enable_steady_tick(Duration::from_millis(120));

            let result = workflow.translate(request).await;
            spinner.finish_and_clear();
            let dubbed = result?;

            tokio::fs::write(&output, &dubbed.bytes).await?;
            println!("Dubbed {} ({} -> {}) to {}",
                     input.display(), dubbed.languages.source, dubbed.languages.target,
                     output.display());
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".redub").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "redub.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("redub.log").display());

    Ok(())
}
