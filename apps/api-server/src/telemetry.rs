//! Telemetry initialization - structured logging setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

/// Telemetry configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Enable JSON logging (for production).
    pub json_logs: bool,
    /// Service name attached to the startup record.
    pub service_name: String,
    /// Deployment environment (`NODE_ENV`).
    pub environment: String,
    /// Filter used when `RUST_LOG` is not set.
    pub default_filter: String,
    /// Tag log lines with a per-request correlation ID.
    pub request_ids: bool,
}

impl TelemetryConfig {
    /// Derive settings from the application environment.
    ///
    /// Production logs JSON at `info`; everything else pretty-prints at
    /// `debug`. `LOG_FORMAT=json|pretty` overrides the format.
    pub fn from_app(config: &AppConfig) -> Self {
        let production = config.is_production();
        let json_logs = match std::env::var("LOG_FORMAT") {
            Ok(v) => v.eq_ignore_ascii_case("json"),
            Err(_) => production,
        };
        let default_filter = if production {
            "info"
        } else {
            "info,api_server=debug,blog_core=debug,blog_infra=debug"
        };

        Self {
            json_logs,
            service_name: std::env::var("SERVICE_NAME").unwrap_or_else(|_| "blog-api".to_string()),
            environment: config.environment.clone(),
            default_filter: default_filter.to_string(),
            request_ids: production,
        }
    }
}

/// Initialize the global tracing subscriber.
pub fn init_telemetry(config: &TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    tracing::info!(
        service = %config.service_name,
        env = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        json_logs = config.json_logs,
        "Telemetry initialized"
    );
}
