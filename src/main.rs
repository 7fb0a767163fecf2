use anyhow::{Context, Result};
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use photo_geo_report::server::{start_server, AppState};
use photo_geo_report::Settings;

/// Web service that turns a batch of photos into a GPS spreadsheet
#[derive(Parser, Debug)]
#[command(name = "photo_geo_report", version, about)]
struct Cli {
    /// Config file (defaults to photo_geo_report.ini next to the executable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory for per-request staging directories
    #[arg(long)]
    upload_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("photo_geo_report=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }
    if let Some(dir) = cli.upload_dir {
        settings.upload_dir = dir;
    }

    info!(
        upload_dir = %settings.upload_dir.display(),
        api_key_configured = settings.api_key.is_some(),
        "Starting photo_geo_report v{}",
        env!("CARGO_PKG_VERSION")
    );

    start_server(AppState::new(settings)).await
}
