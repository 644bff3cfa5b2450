//! The data access contract shared by every backend.

use async_trait::async_trait;

use projecthub_core::{
    Client, ClientId, ClientPatch, NewClient, NewProject, Project, ProjectId, ProjectPatch,
};

use crate::error::StoreError;

/// Per-entity data access used by the API layer.
///
/// Implementations must be safe to share across concurrent requests; the API
/// holds a single `Arc<dyn Store>` for the life of the process and never adds
/// locking of its own.
#[async_trait]
pub trait Store: Send + Sync {
    // ── Clients ──────────────────────────────────────────────────

    /// All clients, in insertion order.
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError>;

    async fn get_client(&self, id: &ClientId) -> Result<Option<Client>, StoreError>;

    /// Persist a new client under a freshly assigned id.
    async fn insert_client(&self, client: NewClient) -> Result<Client, StoreError>;

    /// Remove a client and return what was removed. Projects referencing it
    /// are left as they are.
    async fn remove_client(&self, id: &ClientId) -> Result<Option<Client>, StoreError>;

    /// Merge the supplied fields and return the updated record.
    async fn update_client(
        &self,
        id: &ClientId,
        patch: ClientPatch,
    ) -> Result<Option<Client>, StoreError>;

    // ── Projects ─────────────────────────────────────────────────

    /// All projects, in insertion order.
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError>;

    /// Persist a new project under a freshly assigned id. The referenced
    /// client is not checked.
    async fn insert_project(&self, project: NewProject) -> Result<Project, StoreError>;

    async fn remove_project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError>;

    /// Merge the supplied fields and return the updated record.
    async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, StoreError>;
}
