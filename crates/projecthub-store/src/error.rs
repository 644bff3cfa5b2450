//! Errors from store operations.

use projecthub_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Corrupt record: {0}")]
    Core(#[from] CoreError),
}
