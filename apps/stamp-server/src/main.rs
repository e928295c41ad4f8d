//! PDF stamping server
//!
//! REST API in front of the stamp-core engines:
//!
//! - `POST /api/pdf/apply` — replay placement actions onto an uploaded PDF
//! - `POST /api/pdf/merge` — merge uploaded PDFs in order
//! - `GET /health` — liveness check
//!
//! Every request is self-contained: the document is loaded, mutated, and
//! discarded within the request, so the server scales horizontally with no
//! shared state.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{handle_apply, handle_health, handle_merge};

/// Command-line arguments for the stamp server
#[derive(Parser, Debug)]
#[command(name = "stamp-server")]
#[command(about = "PDF text stamping and merge server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Maximum upload size in megabytes
    #[arg(long, default_value = "25")]
    max_upload_mb: usize,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Routes plus the body limit, shared with the endpoint tests
fn build_router(max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/pdf/apply", post(handle_apply))
        .route("/api/pdf/merge", post(handle_merge))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting stamp server on {}:{}", args.host, args.port);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .expect("Failed to create rate limiter config"),
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = build_router(args.max_upload_mb * 1024 * 1024)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Upload limit: {}MB", args.max_upload_mb);

    axum::serve(listener, app).await?;

    Ok(())
}
