//! offer-gate - token-gated offers service.
//!
//! This binary loads content, builds the router and serves it.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use offer_gate::{
    config::Config,
    content::{StaticContent, StaticOffers},
    server::{create_router, TOKEN_DISPLAY_PATH, TOKEN_PATH},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let content = match config.content_dir {
        Some(ref dir) => match StaticContent::from_dir(dir).await {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to load page content: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => StaticContent::default(),
    };

    let offers = match config.offers_file {
        Some(ref path) => match StaticOffers::from_file(path).await {
            Ok(offers) => offers,
            Err(e) => {
                error!("Failed to load offers: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => StaticOffers::default(),
    };

    let router = create_router(content, offers, config.router_config());
    let addr = config.bind_address();

    info!("offer-gate v{}", env!("CARGO_PKG_VERSION"));
    info!("  Server listening on: http://{}", addr);
    info!("  Display endpoint: {}", config.display_endpoint);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl -X POST http://{}{}", addr, TOKEN_PATH);
    info!("    curl -d token=<key> http://{}{}", addr, TOKEN_PATH);
    info!("    curl -d token=<key> http://{}{}", addr, TOKEN_DISPLAY_PATH);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "offer_gate=debug,tower_http=debug"
    } else {
        "offer_gate=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
