use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use badge_tracker::{report, Config, ProfileClient};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "badge-tracker",
    about = "Collect skill badge and arcade progress for public learner profiles"
)]
struct Cli {
    /// Input CSV with one profile per row
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Summary CSV to write
    #[arg(long)]
    summary: Option<PathBuf>,
    /// Per-badge detail CSV to write
    #[arg(long)]
    details: Option<PathBuf>,
    /// CSV receiving rows that could not be processed
    #[arg(long)]
    failures: Option<PathBuf>,
    /// Input column holding the public profile URL
    #[arg(long)]
    url_column: Option<String>,
    /// Analytics endpoint
    #[arg(long)]
    api_url: Option<String>,
    /// Pause between profiles, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Page scrape timeout, in seconds
    #[arg(long)]
    scrape_timeout: Option<u64>,
    /// Analytics request timeout, in seconds
    #[arg(long)]
    api_timeout: Option<u64>,
    /// Number of dated badges that marks completion
    #[arg(long)]
    milestone: Option<usize>,
    /// Write a sample input file first if the input file is missing
    #[arg(long)]
    create_sample: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::default();
        if let Some(path) = self.input {
            config.input_path = path;
        }
        if let Some(path) = self.summary {
            config.summary_path = path;
        }
        if let Some(path) = self.details {
            config.details_path = path;
        }
        if let Some(path) = self.failures {
            config.failures_path = path;
        }
        if let Some(column) = self.url_column {
            config = config.with_url_column(column);
        }
        if let Some(url) = self.api_url {
            config.api_url = url;
        }
        if let Some(ms) = self.delay_ms {
            config.profile_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = self.scrape_timeout {
            config.scrape_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.api_timeout {
            config.api_timeout = Duration::from_secs(secs);
        }
        if let Some(milestone) = self.milestone {
            config.completion_milestone = milestone;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let create_sample = cli.create_sample;
    let config = cli.into_config();

    if create_sample {
        report::create_sample_input(&config.input_path, &config.identity_columns, &config.url_column)
            .context("could not create sample input file")?;
    }

    let input = config.input_path.display().to_string();
    let client = ProfileClient::new(config)?;
    let stats = badge_tracker::run(&client)
        .await
        .with_context(|| format!("run aborted while processing '{input}'"))?;

    println!(
        "Done: {} processed ({} ok, {} failed, {} skipped), {} badge rows in {:.1}s",
        stats.processed,
        stats.succeeded,
        stats.failed,
        stats.skipped,
        stats.badges,
        t0.elapsed().as_secs_f64()
    );
    Ok(())
}
