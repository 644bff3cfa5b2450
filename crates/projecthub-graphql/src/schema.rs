//! GraphQL schema assembly.

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Schema};

use projecthub_store::Store;

use crate::mutation::MutationRoot;
use crate::query::QueryRoot;

/// The assembled schema. Cloning is cheap and every clone shares the same
/// immutable registry and store.
pub type ProjectHubSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema once at startup with the store injected as context data.
pub fn build_schema(store: Arc<dyn Store>) -> ProjectHubSchema {
    let schema = Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish();
    tracing::info!("GraphQL schema assembled");
    schema
}

/// Export the schema in SDL form.
pub fn export_sdl(schema: &ProjectHubSchema) -> String {
    schema.sdl()
}

/// The store placed into the schema by [`build_schema`].
pub(crate) fn store_of<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<dyn Store>> {
    ctx.data::<Arc<dyn Store>>()
}

#[cfg(test)]
mod tests {
    use projecthub_store::MemoryStore;

    use super::*;

    #[test]
    fn sdl_declares_entities_and_labels() {
        let sdl = export_sdl(&build_schema(Arc::new(MemoryStore::new())));

        assert!(sdl.contains("type Client"));
        assert!(sdl.contains("type Project"));
        assert!(sdl.contains("clientId: ID!"));
        assert!(sdl.contains("client: Client"));
        assert!(sdl.contains("enum ProjectStatus"));
        for label in ["new", "progress", "completed"] {
            assert!(sdl.contains(label), "missing status label {label}");
        }
        assert!(!sdl.contains("createdAt"));
    }
}
