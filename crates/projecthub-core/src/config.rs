//! Configuration management for ProjectHub services.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (PROJECTHUB_ prefix, `__` separator)
//! 2. Config file (projecthub.toml)
//! 3. Defaults
//!
//! The unprefixed `PORT` variable, when set, overrides `server.port`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;

use crate::error::CoreError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP transport settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,

    /// Listening port (default: 5000).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Serve the interactive GraphQL playground on `GET /graphql`.
    #[serde(default)]
    pub playground: bool,
}

/// Which storage backend to use and how to reach it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    #[serde(default)]
    pub neo4j: Neo4jConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process store; contents are lost on exit.
    #[default]
    Memory,
    Neo4j,
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jConfig {
    #[serde(default = "default_neo4j_uri")]
    pub uri: String,
    #[serde(default = "default_neo4j_user")]
    pub user: String,
    #[serde(default = "default_neo4j_password")]
    pub password: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_neo4j_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_neo4j_user() -> String {
    "neo4j".to_string()
}

fn default_neo4j_password() -> String {
    "projecthub-dev".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            playground: false,
        }
    }
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: default_neo4j_uri(),
            user: default_neo4j_user(),
            password: default_neo4j_password(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl AppConfig {
    /// Load from `{file_prefix}.toml` (optional) and `PROJECTHUB__*` variables.
    pub fn load(file_prefix: &str) -> Result<Self, CoreError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("PROJECTHUB")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut app = Self::from_builder(builder)?;
        app.apply_port_override(std::env::var("PORT").ok().as_deref());
        Ok(app)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, CoreError> {
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Apply a raw `PORT` value. Unparseable values are ignored with a warning.
    pub fn apply_port_override(&mut self, raw: Option<&str>) {
        let Some(raw) = raw else {
            return;
        };
        match raw.trim().parse::<u16>() {
            Ok(port) => self.server.port = port,
            Err(e) => tracing::warn!(value = %raw, error = %e, "Ignoring invalid PORT"),
        }
    }

    /// `host:port` string suitable for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
