//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::HttpServer;

mod app;
mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load env/.env* files if present
    let env_files = config::load_env_files()?;

    let config = AppConfig::from_env()?;

    let telemetry = TelemetryConfig::from_app(&config);
    telemetry::init_telemetry(&telemetry);
    tracing::debug!(files = ?env_files, "Environment files loaded");

    // The database must be reachable before traffic is accepted.
    let state = match AppState::connect(&config.database(), &config.environment).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            return Err(e.into());
        }
    };

    tracing::info!(
        "Starting Blog API Server on {}:{}{}",
        config.host,
        config.port,
        config.api_prefix
    );

    let bind = (config.host.clone(), config.port);
    let request_ids = telemetry.request_ids;

    HttpServer::new(move || app::build_app(state.clone(), config.clone(), request_ids))
        .bind(bind)?
        .run()
        .await?;

    Ok(())
}
