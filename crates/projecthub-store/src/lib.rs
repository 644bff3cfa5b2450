//! ProjectHub Store: data access for clients and projects.
//!
//! Every read and write the API performs goes through the [`Store`] trait.
//! Two backends implement it: an in-process [`MemoryStore`] and a Neo4j-backed
//! [`Neo4jStore`]. Not-found is never an error here; lookups and removals
//! return `Option`.

pub mod connection;
pub mod error;
pub mod memory;
pub mod mutations;
pub mod queries;
pub mod store;

use std::sync::Arc;

use projecthub_core::config::{StoreBackend, StoreConfig};

pub use connection::Neo4jStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::Store;

/// Open the backend selected by configuration.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn Store>, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Neo4j => {
            let store = Neo4jStore::connect(&config.neo4j).await?;
            Ok(Arc::new(store))
        }
    }
}
