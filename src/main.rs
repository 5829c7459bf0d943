//! Free Fire data API server entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use freefire_api::api::{create_router, AppState};
use freefire_api::config::Config;
use freefire_api::metrics;
use freefire_api::region::Region;
use freefire_api::upstream::FreeFireClient;
use freefire_api::utils::shutdown_signal;

/// REST wrapper exposing Free Fire player, account, and guild data.
#[derive(Parser, Debug)]
#[command(name = "free-fire-api")]
#[command(about = "REST wrapper for Free Fire game data")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port.
    #[arg(short, long, default_value = "5000")]
    port: u16,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the API server (default).
    Run {
        /// HTTP server port.
        #[arg(short, long, default_value = "5000")]
        port: u16,
    },

    /// Check configuration validity.
    CheckConfig,

    /// List supported regions and their effective base URLs.
    Regions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("freefire_api=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Regions) => cmd_regions(),
        Some(Command::Run { port }) => cmd_run(port).await,
        None => cmd_run(args.port).await,
    }
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("FREE FIRE API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Upstream Base URL: {}", config.upstream_base_url);
    println!("  Likes URL: {}", config.likes_url);
    println!("  Region Overrides: {}", config.region_overrides().map_or(0, |o| o.len()));
    println!("  Send-Likes Key: {}", if config.has_api_key() { "configured" } else { "not set" });
    println!("  HTTP Timeout: {}ms", config.http_timeout_ms);
    println!("  Port: {}", config.port);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// List supported regions and their effective base URLs.
fn cmd_regions() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let client = FreeFireClient::new(&config);

    println!("Supported regions:");
    for region in Region::ALL {
        println!("  {:<4} -> {}", region.as_str(), client.base_for(region));
    }

    Ok(())
}

/// Run the API server.
async fn cmd_run(port: u16) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Configuration loaded successfully");
    info!("Upstream base URL: {}", config.upstream_base_url);
    info!(
        "Send-likes key: {}",
        if config.has_api_key() { "configured" } else { "not set" }
    );

    // Initialize metrics
    metrics::init_metrics();
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install metrics recorder: {}", e))?;

    // Create upstream client and app state
    let client = FreeFireClient::new(&config);
    let app_state =
        AppState::new(client, config.ff_api_key.clone()).with_metrics(metrics_handle);

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    info!("Swagger UI available at http://{}/docs", addr);

    let router = create_router(app_state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}
