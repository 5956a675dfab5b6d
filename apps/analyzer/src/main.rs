mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_analyzer::api::HttpResumeApi;
use resume_analyzer::config::Config;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.clone();
    }

    // Logs go to stderr so they never interleave with rendered views on stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    let api = HttpResumeApi::new(&config)?;
    info!("API client initialized (base url: {})", api.base_url());

    cli::run(cli, Arc::new(api), &config).await
}
