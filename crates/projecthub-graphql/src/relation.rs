//! Project → client relation lookup.

use projecthub_core::{Client, Project};
use projecthub_store::{Store, StoreError};

/// Fetch the client a project points at.
///
/// Performs exactly one store read. A dangling `client_id` yields `None`.
/// Nothing is cached or batched across projects, so resolving the client of
/// N listed projects costs N reads.
pub async fn resolve_client_for(
    project: &Project,
    store: &dyn Store,
) -> Result<Option<Client>, StoreError> {
    let client = store.get_client(&project.client_id).await?;
    if client.is_none() {
        tracing::debug!(
            project_id = %project.id,
            client_id = %project.client_id,
            "Project references a missing client"
        );
    }
    Ok(client)
}
