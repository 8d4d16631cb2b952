mod export;
mod prompt;
mod scan;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zipscout_places::{FixedDelay, IntervalGate, PlacesClient};

use scan::{FailurePolicy, ScanSettings, MAX_ZIP_CODES};

#[derive(Debug, Parser)]
#[command(name = "zipscout")]
#[command(about = "Find businesses without a website inside postal-code areas")]
struct Cli {
    /// Postal codes to scan. Prompts for them when none are given.
    #[arg(num_args = 0..=MAX_ZIP_CODES, value_name = "ZIP")]
    zip_codes: Vec<String>,

    /// CSV file to write (overrides `ZIPSCOUT_OUTPUT_PATH`).
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Skip a postal code whose scan fails instead of aborting the run.
    #[arg(long)]
    skip_failed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = zipscout_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::debug!(?config, "configuration loaded");

    let zip_codes = if cli.zip_codes.is_empty() {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        prompt::prompt_zip_codes(stdin.lock(), stdout.lock(), MAX_ZIP_CODES)?
    } else {
        cli.zip_codes
    };

    let client = PlacesClient::with_base_url(
        &config.google_maps_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.api_base_url,
    )?
    .with_gates(
        FixedDelay::new(Duration::from_millis(config.page_token_delay_ms)),
        IntervalGate::new(Duration::from_millis(config.details_interval_ms)),
    );

    let on_failure = if cli.skip_failed || config.skip_failed_zips {
        FailurePolicy::Skip
    } else {
        FailurePolicy::Abort
    };

    let settings = ScanSettings {
        grid_step_degrees: config.grid_step_degrees,
        search_radius_meters: config.search_radius_meters,
        on_failure,
        output_path: cli.output.unwrap_or(config.output_path),
    };

    if let Some(summary) = scan::run_scan(&client, &settings, &zip_codes).await? {
        tracing::info!(
            processed = summary.processed,
            skipped = summary.skipped.len(),
            rows = summary.rows_written,
            "scan complete"
        );
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
