//! Wildfire Dashboard
//!
//! Run with: cargo run -- serve
//!
//! # Configuration
//!
//! Loaded from `--config`, else `~/.config/wildfire-dashboard/config.toml` or
//! `./config.toml`, else defaults. Environment variables override the file:
//! - `WILDFIRE_DATASET`: CSV URL or path
//! - `WILDFIRE_HOST` / `WILDFIRE_PORT`: bind address (default: 127.0.0.1:8050)
//! - `WILDFIRE_DEBUG`: debug logging
//! - `WILDFIRE_LOG_LEVEL` / `WILDFIRE_LOG_FORMAT`: logging
//! - `RUST_LOG`: full filter override
//!
//! Command-line flags override both.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use wildfire_dashboard::api::{serve, AppState};
use wildfire_dashboard::charts::SelectionHandler;
use wildfire_dashboard::config::{generate_default_config, Config};
use wildfire_dashboard::dataset::{Dataset, DatasetLoader, LoadReport, Region};
use wildfire_dashboard::layout::LayoutBuilder;
use wildfire_dashboard::logging;

#[derive(Parser)]
#[command(name = "wildfire-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Australian wildfire dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset URL or path (overrides config)
    #[arg(short, long, global = true)]
    pub dataset: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard (default)
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable debug logging
        #[arg(long)]
        debug: bool,
    },

    /// Print the two charts of a selection as JSON
    Charts {
        /// Region code (NSW, NT, QL, SA, TA, VI, WA)
        #[arg(short, long, default_value = "NSW")]
        region: String,
        /// Year
        #[arg(short, long, default_value_t = 2005)]
        year: i32,
    },

    /// List the years present in the dataset
    Years,

    /// Print the default configuration file
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::InitConfig) = cli.command {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let (mut config, config_path) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Some(path.clone())),
        None => Config::load_default()?,
    };
    if let Some(source) = &cli.dataset {
        config.dataset.source = source.clone();
    }

    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        debug: false,
    });
    if let Commands::Serve { host, port, debug } = &command {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
        config.server.debug |= *debug;
    }

    logging::init(&config.logging, config.server.debug);
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    match command {
        Commands::Serve { .. } => run_server(config).await,
        Commands::Charts { region, year } => {
            let region: Region = region.parse()?;
            let (dataset, _) = load_dataset(&config).await?;

            let handler = SelectionHandler::new(Arc::new(dataset));
            let (area_chart, count_chart) = handler.handle(region, year);
            let output = serde_json::json!({
                "plot1": area_chart,
                "plot2": count_chart,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Commands::Years => {
            let (dataset, _) = load_dataset(&config).await?;
            for year in dataset.years() {
                println!("{}", year);
            }
            Ok(())
        }
        Commands::InitConfig => Ok(()),
    }
}

async fn load_dataset(config: &Config) -> anyhow::Result<(Dataset, LoadReport)> {
    let loader = DatasetLoader::new()
        .with_fetch_timeout(Duration::from_secs(config.dataset.fetch_timeout_secs));

    loader
        .load(&config.dataset.source)
        .await
        .with_context(|| format!("Failed to load dataset from {}", config.dataset.source))
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting wildfire dashboard v{}",
        env!("CARGO_PKG_VERSION")
    );

    let (dataset, report) = load_dataset(&config).await?;
    if report.rows_skipped > 0 {
        tracing::warn!(
            rows_skipped = report.rows_skipped,
            "Some dataset rows were malformed and skipped"
        );
    }

    let default_region: Region = config
        .dashboard
        .default_region
        .parse()
        .context("Invalid dashboard.default_region")?;

    let layout = LayoutBuilder::new(dataset.years())
        .default_region(default_region)
        .default_year(config.dashboard.default_year)
        .build();

    let state = AppState::new(Arc::new(dataset), report, layout)?;

    tracing::info!("Starting server on {}:{}", config.server.host, config.server.port);
    serve(state, &config.server).await?;

    tracing::info!("Wildfire dashboard stopped");
    Ok(())
}
