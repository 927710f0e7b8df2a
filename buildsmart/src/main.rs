//! The buildsmart binary: floor-plan cost estimates from the command line.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use buildsmart::prelude::*;
use buildsmart_gemini::{GenerateConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON cost schedule replacing the built-in one
    #[arg(long, global = true)]
    schedule: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract quantities from a floor-plan image and estimate costs
    Analyze {
        /// PNG, JPEG or WebP floor plan
        image: PathBuf,
        /// Maximum model calls
        #[arg(long, default_value_t = 3)]
        max_attempts: usize,
        /// Seconds to wait between model calls
        #[arg(long, default_value_t = 2.0)]
        retry_delay: f64,
        /// Gemini model name
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,
        /// API base URL
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
        /// Per-call timeout in seconds
        #[arg(long, default_value_t = 60)]
        timeout: u64,
        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f32>,
        /// API key (defaults to GEMINI_API_KEY, then GOOGLE_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Estimate costs from known quantities, without a model
    Estimate {
        /// Built-up area in square feet
        #[arg(long)]
        area: f64,
        /// Number of doors
        #[arg(long, default_value_t = 0)]
        doors: u32,
        /// Number of windows
        #[arg(long, default_value_t = 0)]
        windows: u32,
    },
    /// Print the effective cost schedule
    Schedule,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let pretty = cli.pretty;
    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, status = err.status_code(), "Request failed");
            if let Err(print_err) = print_json(&ErrorPayload::from(&err), pretty) {
                tracing::error!(error = %print_err, "Failed to write error payload");
            }
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<(), Error> {
    let config = AppConfig::new().with_schedule_file(cli.schedule.as_deref())?;

    match cli.command {
        Commands::Analyze {
            image,
            max_attempts,
            retry_delay,
            model,
            base_url,
            timeout,
            temperature,
            api_key,
        } => {
            let retry_delay = Duration::try_from_secs_f64(retry_delay)
                .map_err(|e| Error::Config(format!("invalid --retry-delay: {e}")))?;

            let config = AppConfig {
                gemini: GeminiSettings {
                    api_key,
                    generate: GenerateConfig {
                        model,
                        base_url,
                        temperature,
                        timeout: Duration::from_secs(timeout),
                    },
                },
                extraction: config
                    .extraction
                    .with_max_attempts(max_attempts)
                    .with_retry_delay(retry_delay),
                schedule: config.schedule,
            };

            let analyzer = Analyzer::from_config(config)?;
            let upload = read_image(&image)?;
            let analysis = analyzer.analyze(Some(upload)).await?;
            tracing::info!(
                attempts = analysis.metrics.total_attempts,
                elapsed_ms = %analysis.metrics.wall_time.as_millis(),
                image_bytes_sent = analysis.metrics.image_bytes_sent,
                input_tokens = analysis.metrics.estimated_input_tokens,
                output_tokens = analysis.metrics.estimated_output_tokens,
                "Analysis complete"
            );
            print_json(&analysis.breakdown, cli.pretty)
        }
        Commands::Estimate {
            area,
            doors,
            windows,
        } => {
            config.schedule.validate()?;
            let quantities = QuantityRecord::new(area, doors, windows)?;
            let breakdown = buildsmart_core::estimate(&quantities, &config.schedule);
            print_json(&breakdown, cli.pretty)
        }
        Commands::Schedule => print_json(&config.schedule, cli.pretty),
    }
}

/// A missing or unreadable file is the caller's mistake, like an absent upload.
fn read_image(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|e| {
        ExtractionError::InvalidImage(format!("Failed to read {}: {e}", path.display())).into()
    })
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), Error> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| Error::Config(format!("failed to serialize output: {e}")))?;
    println!("{text}");
    Ok(())
}
