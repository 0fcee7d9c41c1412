//! pdfsift Extraction Service
//!
//! Accepts PDF uploads, extracts tabular and key-value data, and serves
//! the assembled dataset as CSV/XLSX downloads with summary insights.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use pdfsift_utils::{init_logging, AppConfig};

mod handlers;
mod pdf_decoder;

use handlers::{download_file, health_check, upload_file, AppState};
use pdf_decoder::PdfExtractDecoder;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|_| {
        eprintln!("Failed to load configuration, using defaults");
        AppConfig::default()
    });

    init_logging(&config.logging)?;
    info!("Starting pdfsift Extraction Service");

    tokio::fs::create_dir_all(&config.storage.upload_dir)
        .await
        .context("Failed to create upload directory")?;
    tokio::fs::create_dir_all(&config.storage.output_dir)
        .await
        .context("Failed to create output directory")?;

    let app = create_app(&config);

    let host: IpAddr = config
        .server
        .host
        .parse()
        .context("Invalid server host address")?;
    let addr = SocketAddr::from((host, config.server.port));
    let listener = TcpListener::bind(&addr).await?;
    info!("Extraction Service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn create_app(config: &AppConfig) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/upload", post(upload_file))
        .route("/api/download/:filename", get(download_file))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE]),
                )
                .layer(DefaultBodyLimit::max(config.server.max_upload_bytes)),
        )
        .with_state(AppState {
            decoder: Arc::new(PdfExtractDecoder::new()),
            config: config.clone(),
        })
}
