//! Application configuration loaded from environment variables.

use std::env;
use std::path::{Path, PathBuf};

use blog_infra::DatabaseConfig;
use thiserror::Error;

pub const PRODUCTION: &str = "production";
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ENV_DIR: &str = "env";

/// Configuration failures. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("failed to load {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
    pub allowed_content_types: Vec<String>,
    pub database_url: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("NODE_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        let production = environment == PRODUCTION;

        // Production talks to the hosted cluster, everything else to a local one.
        let url_var = if production {
            "MONGO_DB_URL"
        } else {
            "MONGO_DB_LOCAL"
        };
        let database_url = lookup(url_var)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingVar(url_var))?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            api_prefix: if production { "/api" } else { "/dev-api" }.to_string(),
            allowed_content_types: vec![
                "application/json".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            ],
            database_url,
            environment,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == PRODUCTION
    }

    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_url)
    }
}

/// Load `.env` files from `ENV_DIR` (default `env/`), most specific first.
///
/// Variables already set are never overridden, so the first file to define a
/// key wins. Missing files are skipped. Returns the files that were loaded.
pub fn load_env_files() -> Result<Vec<PathBuf>, ConfigError> {
    let dir = env::var("ENV_DIR").unwrap_or_else(|_| DEFAULT_ENV_DIR.to_string());
    let node_env = env::var("NODE_ENV").unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());
    load_env_dir(Path::new(&dir), &node_env)
}

fn load_env_dir(dir: &Path, node_env: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let mut loaded = Vec::new();
    for path in env_file_cascade(dir, node_env) {
        match dotenvy::from_path(&path) {
            Ok(()) => loaded.push(path),
            Err(e) if e.not_found() => {}
            Err(source) => return Err(ConfigError::EnvFile { path, source }),
        }
    }

    Ok(loaded)
}

/// Candidate env files in priority order.
fn env_file_cascade(dir: &Path, node_env: &str) -> Vec<PathBuf> {
    let mut files = vec![dir.join(format!(".env.{node_env}.local"))];
    // Test runs must be reproducible, so the machine-local file is ignored.
    if node_env != "test" {
        files.push(dir.join(".env.local"));
    }
    files.push(dir.join(format!(".env.{node_env}")));
    files.push(dir.join(".env"));
    files
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn development_defaults() {
        let config =
            AppConfig::from_lookup(lookup(&[("MONGO_DB_LOCAL", "mongodb://localhost:27017/blog")]))
                .unwrap();

        assert_eq!(config.environment, "development");
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_prefix, "/dev-api");
        assert_eq!(config.database_url, "mongodb://localhost:27017/blog");
        assert!(
            config
                .allowed_content_types
                .contains(&"application/json".to_string())
        );
        assert!(!config.is_production());
    }

    #[test]
    fn production_uses_hosted_url_and_api_prefix() {
        let config = AppConfig::from_lookup(lookup(&[
            ("NODE_ENV", "production"),
            ("PORT", "8080"),
            ("MONGO_DB_URL", "mongodb://db.internal/blog"),
            ("MONGO_DB_LOCAL", "mongodb://localhost/blog"),
        ]))
        .unwrap();

        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "mongodb://db.internal/blog");
        assert!(config.is_production());
    }

    #[test]
    fn missing_database_url_is_fatal() {
        let err = AppConfig::from_lookup(lookup(&[
            ("NODE_ENV", "production"),
            ("MONGO_DB_LOCAL", "mongodb://localhost/blog"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::MissingVar("MONGO_DB_URL")));
    }

    #[test]
    fn unparsable_port_falls_back_to_default() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "not-a-port"),
            ("MONGO_DB_LOCAL", "mongodb://localhost/blog"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
    }

    #[test]
    fn cascade_orders_most_specific_first() {
        let files = env_file_cascade(Path::new("env"), "development");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            names,
            vec![
                ".env.development.local",
                ".env.local",
                ".env.development",
                ".env"
            ]
        );
    }

    #[test]
    fn cascade_skips_local_file_for_tests() {
        let files = env_file_cascade(Path::new("env"), "test");
        assert!(!files.iter().any(|p| p.ends_with(".env.local")));
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn env_file_is_read_without_overriding() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env.staging"),
            "BLOG_CONFIG_TEST_KEY=from-staging\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "BLOG_CONFIG_TEST_KEY=from-base\nBLOG_CONFIG_TEST_BASE=base\n",
        )
        .unwrap();

        let loaded = load_env_dir(dir.path(), "staging").unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(env::var("BLOG_CONFIG_TEST_KEY").unwrap(), "from-staging");
        assert_eq!(env::var("BLOG_CONFIG_TEST_BASE").unwrap(), "base");
    }

    #[test]
    fn malformed_env_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "NOT VALID LINE ' \n").unwrap();

        let err = load_env_dir(dir.path(), "qa").unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile { .. }));
    }
}
