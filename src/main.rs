use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tax_engine::api::{AppState, create_router};
use tax_engine::config::ConfigLoader;

/// Income tax calculation service for South African personal tax returns.
///
/// Loads every tax-year policy from the configuration directory at startup
/// and serves calculations over HTTP.
#[derive(Debug, Parser)]
struct Cli {
    /// Directory holding jurisdiction.yaml and tax_years/.
    #[arg(long, default_value = "./config/za")]
    config: PathBuf,

    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,
}

/// Honours `RUST_LOG`, falling back to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = ConfigLoader::load(&cli.config)?;
    info!(
        jurisdiction = %config.jurisdiction().code,
        tax_years = ?config.tax_years(),
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&cli.addr).await?;
    info!(addr = %cli.addr, "Listening");

    axum::serve(listener, router).await?;

    Ok(())
}
