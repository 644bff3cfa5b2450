use thiserror::Error;

/// Top-level error type for the ProjectHub core crate.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid {kind} id '{value}': {source}")]
    InvalidId {
        kind: &'static str,
        value: String,
        #[source]
        source: uuid::Error,
    },

    #[error("Invalid project status: {0}")]
    InvalidStatus(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
