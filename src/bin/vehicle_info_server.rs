//! Vehicle info HTTP server
//!
//! Serves `GET /api/vehicle-info?rc=<REGISTRATION_NUMBER>`.

use clap::Parser;
use std::{net::SocketAddr, time::Duration};
use vahan_lookup::service::{AppState, DEFAULT_UPSTREAM, ServiceConfig, VEHICLE_INFO_PATH, router};

#[derive(Parser)]
#[command(name = "vehicle-info-server")]
#[command(version)]
#[command(about = "HTTP service scraping vehicle registration details", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, short = 'b', default_value = "127.0.0.1:8888")]
    bind: SocketAddr,

    /// Site the registration pages are fetched from
    #[arg(long, value_name = "URL", default_value = DEFAULT_UPSTREAM)]
    upstream: String,

    /// Timeout for each upstream request, in seconds
    #[arg(long, default_value = "10")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = ServiceConfig { upstream_base: cli.upstream, timeout: Duration::from_secs(cli.timeout_secs) };
    let state = AppState::new(&config)?;

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    log::info!("Upstream: {}", config.upstream_base);
    log::info!("Listening on http://{}{}", listener.local_addr()?, VEHICLE_INFO_PATH);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    log::info!("Server stopped");
    Ok(())
}
