use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use bot_manager::api::{self, ApiClient};
use bot_manager::app::App;
use bot_manager::constants::SAMPLE_PERIOD_MS;
use bot_manager::ui;

#[derive(Parser)]
#[command(name = "bot_manager", about = "Terminal console for operating a streaming chat-bot fleet")]
struct Cli {
    /// Base URL of the control endpoint
    #[arg(long, env = "BOT_MANAGER_ENDPOINT")]
    endpoint: Url,

    /// Activity sampling period in milliseconds
    #[arg(long, default_value_t = SAMPLE_PERIOD_MS)]
    period_ms: u64,

    /// Append diagnostics to this file (the terminal itself belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &PathBuf) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let endpoint_host = cli
        .endpoint
        .host_str()
        .unwrap_or("endpoint")
        .to_string();
    let client = ApiClient::new(cli.endpoint.clone()).context("cannot build HTTP client")?;

    let (jobs, job_queue) = mpsc::channel();
    let inbox = api::new_inbox();
    api::spawn_worker(client, job_queue, Arc::clone(&inbox));

    let app = App::new(jobs, inbox, endpoint_host, Duration::from_millis(cli.period_ms));
    ui::run(app)
}
