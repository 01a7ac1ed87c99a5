use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use nu_client::cli::{ReaderArgs, ReaderCommands};
use nu_client::{handle_command, init_logging, ClientConfig, FeedManager, HttpNewsApi};
use nu_core::NewsApi;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal reader for the newsup backend", long_about = None)]
pub struct Cli {
    /// JSON file with client settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured backend URL
    #[arg(long)]
    base_url: Option<String>,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: ReaderCommands,
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url);
        config.validate().context("invalid --base-url")?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    debug!("Using backend {}", config.base_url);

    let api: Arc<dyn NewsApi> = Arc::new(HttpNewsApi::new(&config).context("failed to create API client")?);
    info!("📰 Reading from {} sources", config.sources.len());
    let manager = FeedManager::new(api, config);

    handle_command(ReaderArgs { command: cli.command }, &manager).await?;
    Ok(())
}
