//! FTP Gateway - HTTP API and browser client for a partner's FTP inbox
//!
//! # Usage
//! ```bash
//! ftp-gateway --ftp-host files.example.com --ftp-user me --ftp-password secret
//! FTP_HOST=files.example.com ftp-gateway --open   # Start and open browser
//! ```

mod config;
mod convert;
mod day_window;
mod error;
mod ftp;
mod models;
mod routes;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use clap::Parser;
use rust_embed::Embed;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Cli;
use ftp::{FtpGateway, SuppaConnector};
use routes::AppState;

/// Embedded frontend static files
#[derive(Embed)]
#[folder = "frontend/dist"]
struct Assets;

fn asset_response(path: &str) -> Option<Response> {
    let content = Assets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.as_ref().to_string())],
            Body::from(content.data.into_owned()),
        )
            .into_response(),
    )
}

/// Serve embedded static files
async fn serve_static(req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');

    // Default to index.html for root or non-file paths
    let path = if path.is_empty() || !path.contains('.') {
        "index.html"
    } else {
        path
    };

    asset_response(path)
        .or_else(|| asset_response("index.html"))
        .unwrap_or_else(|| (StatusCode::NOT_FOUND, "Not Found").into_response())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = cli.app_config()?;
    tracing::info!("FTP server: {:?}", config.ftp);

    let ftp_addr = config.ftp.addr();
    let state = Arc::new(AppState {
        gateway: FtpGateway::new(Arc::new(SuppaConnector::new(config.ftp))),
        layout: config.layout.clone(),
        utc_offset: config.utc_offset,
        max_upload_bytes: config.max_upload_bytes,
        clock: chrono::Utc::now,
    });

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router with API routes and static file serving
    let app = Router::new()
        .merge(routes::create_router(state))
        .fallback(get(serve_static))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", cli.bind, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    let url = format!("http://{}", addr);
    println!();
    println!("  FTP Gateway");
    println!();
    println!("  FTP server: {}", ftp_addr);
    println!("  Inbox:      {}", config.layout.inbox);
    println!("  Processed:  {}", config.layout.processed);
    println!("  Server:     {}", url);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    if cli.open {
        if let Err(e) = open::that(&url) {
            eprintln!("  Warning: Could not open browser: {}", e);
        }
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
