//! Configuration manager for roster.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::FromRef;
use serde::Deserialize;

use crate::AppState;
use crate::user::Identity;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_PORT: u16 = 8080;
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Instance name.
    pub name: String,
    /// Listening port.
    pub port: u16,
    /// Key identifying a user on reads, deletes and upserts.
    pub identity: Identity,
    pub pagination: Pagination,
    #[serde(skip_deserializing)]
    pub version: String,
    #[serde(skip)]
    path: PathBuf,
    /// Related to PostgreSQL configuration.
    pub postgres: Option<Postgres>,
    /// Related to OpenTelemetry and Prometheus.
    pub telemetry: Telemetry,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_owned(),
            port: DEFAULT_PORT,
            identity: Identity::default(),
            pagination: Pagination::default(),
            version: VERSION.to_owned(),
            path: PathBuf::default(),
            postgres: None,
            telemetry: Telemetry::default(),
        }
    }
}

/// Bounds of `GET /users` query parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// Page size when the client sends none.
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub max_page_number: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            max_page_size: 100,
            max_page_number: 10_000,
        }
    }
}

/// PostgreSQL configuration.
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
pub struct Postgres {
    /// Hostname:(?port) for PostgreSQL instance.
    pub address: String,
    /// Database name.
    pub database: Option<String>,
    /// Username credential to connect.
    pub username: Option<String>,
    /// Password credential to connect.
    pub password: Option<String>,
    /// Maximum pool connections.
    pub pool_size: Option<u32>,
}

/// Telemetry configuration.
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default)]
pub struct Telemetry {
    /// OTLP gRPC collector receiving traces and logs.
    pub otlp_endpoint: Option<String>,
    /// Expose `GET /metrics`.
    pub prometheus: bool,
}

impl FromRef<AppState> for Arc<Configuration> {
    fn from_ref(state: &AppState) -> Arc<Configuration> {
        Arc::clone(&state.config)
    }
}

impl Configuration {
    pub fn path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    /// Reads the `config.yaml` file from the specified path or the default
    /// location.
    pub fn read(self) -> Arc<Self> {
        let file_path: &Path = if self.path.is_file() {
            &self.path
        } else {
            Path::new(DEFAULT_CONFIG_PATH)
        };

        let mut config = match File::open(file_path) {
            Ok(file) => match serde_yaml::from_reader::<_, Configuration>(file) {
                Ok(config) => config,
                Err(err) => self.error(err),
            },
            Err(err) => self.error(err),
        };

        // set app version.
        config.version = VERSION.to_owned();

        if let Some(port) =
            std::env::var("PORT").ok().and_then(|p| p.parse().ok())
        {
            config.port = port;
        }

        config.pagination.max_page_size = config.pagination.max_page_size.max(1);
        config.pagination.default_page_size = config
            .pagination
            .default_page_size
            .clamp(1, config.pagination.max_page_size);

        Arc::new(config)
    }

    /// Return a default configuration as fallback.
    fn error(&self, err: impl std::error::Error) -> Self {
        tracing::error!(error = %err, path = ?self.path, "`config.yaml` file cannot be read");
        Self::default()
    }
}
