//! bannerd - ASCII banner web service
//!
//! Renders text as large block letters from banner font descriptions and
//! serves the result over HTTP with text/zip download.

use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// bannerd - ASCII banner web service
#[derive(Parser, Debug)]
#[command(name = "bannerd")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides config)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (overrides config)
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Directory holding banner font descriptions (overrides config)
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("bannerd={}", log_level)),
        ))
        .init();

    tracing::info!("Starting bannerd v{}", env!("CARGO_PKG_VERSION"));

    let mut config = bannerd_config::Config::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.fonts_dir {
        config.paths.fonts_dir = dir;
    }

    let server = bannerd_web::BannerServer::new(config);
    server.run().await?;

    Ok(())
}
