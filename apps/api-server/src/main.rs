//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!("Starting blog API server on {}:{}", config.host, config.port);

    // Storage is required: fail startup rather than serve without it
    let state = AppState::new(&config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize storage");
        std::io::Error::other(e)
    })?;

    let server_state = state.clone();
    let result = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(server_state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    state.shutdown().await;
    tracing::info!(storage = state.storage(), "Server stopped");
    result
}
