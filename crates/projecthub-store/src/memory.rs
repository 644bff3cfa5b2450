//! In-process store backed by insertion-ordered vectors.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use projecthub_core::{
    Client, ClientId, ClientPatch, NewClient, NewProject, Project, ProjectId, ProjectPatch,
};

use crate::error::StoreError;
use crate::store::Store;

/// Store that keeps everything in memory.
///
/// Records live in vectors so `list_*` returns them in insertion order.
/// Lookups are linear, which is fine for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    clients: RwLock<Vec<Client>>,
    projects: RwLock<Vec<Project>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        Ok(self.clients.read().await.clone())
    }

    async fn get_client(&self, id: &ClientId) -> Result<Option<Client>, StoreError> {
        let clients = self.clients.read().await;
        Ok(clients.iter().find(|c| &c.id == id).cloned())
    }

    async fn insert_client(&self, client: NewClient) -> Result<Client, StoreError> {
        let record = client.into_record(ClientId::new(), Utc::now());
        self.clients.write().await.push(record.clone());
        tracing::debug!(client_id = %record.id, "Client inserted");
        Ok(record)
    }

    async fn remove_client(&self, id: &ClientId) -> Result<Option<Client>, StoreError> {
        let mut clients = self.clients.write().await;
        let removed = clients
            .iter()
            .position(|c| &c.id == id)
            .map(|idx| clients.remove(idx));
        Ok(removed)
    }

    async fn update_client(
        &self,
        id: &ClientId,
        patch: ClientPatch,
    ) -> Result<Option<Client>, StoreError> {
        let mut clients = self.clients.write().await;
        Ok(clients.iter_mut().find(|c| &c.id == id).map(|client| {
            patch.apply(client);
            client.clone()
        }))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.projects.read().await.clone())
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        let projects = self.projects.read().await;
        Ok(projects.iter().find(|p| &p.id == id).cloned())
    }

    async fn insert_project(&self, project: NewProject) -> Result<Project, StoreError> {
        let record = project.into_record(ProjectId::new(), Utc::now());
        self.projects.write().await.push(record.clone());
        tracing::debug!(project_id = %record.id, client_id = %record.client_id, "Project inserted");
        Ok(record)
    }

    async fn remove_project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        let mut projects = self.projects.write().await;
        let removed = projects
            .iter()
            .position(|p| &p.id == id)
            .map(|idx| projects.remove(idx));
        Ok(removed)
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, StoreError> {
        let mut projects = self.projects.write().await;
        Ok(projects.iter_mut().find(|p| &p.id == id).map(|project| {
            patch.apply(project);
            project.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use projecthub_core::ProjectStatus;

    use super::*;

    fn ada() -> NewClient {
        NewClient {
            name: "Ada".to_string(),
            email: "ada@x.io".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn engine(client_id: ClientId) -> NewProject {
        NewProject {
            name: "Engine".to_string(),
            description: "core".to_string(),
            status: ProjectStatus::default(),
            client_id,
        }
    }

    #[tokio::test]
    async fn insert_then_get_client() {
        let store = MemoryStore::new();
        let client = store.insert_client(ada()).await.unwrap();

        let fetched = store.get_client(&client.id).await.unwrap().unwrap();
        assert_eq!(fetched, client);
        assert_eq!(fetched.name, "Ada");
        assert_eq!(fetched.email, "ada@x.io");
        assert_eq!(fetched.phone, "555-0100");
    }

    #[tokio::test]
    async fn inserts_assign_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert_client(ada()).await.unwrap();
        let b = store.insert_client(ada()).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for name in ["first", "second", "third"] {
            let mut new = ada();
            new.name = name.to_string();
            ids.push(store.insert_client(new).await.unwrap().id);
        }

        let listed: Vec<_> = store
            .list_clients()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn remove_client_returns_record_once() {
        let store = MemoryStore::new();
        let client = store.insert_client(ada()).await.unwrap();

        let removed = store.remove_client(&client.id).await.unwrap();
        assert_eq!(removed, Some(client.clone()));
        assert!(store.get_client(&client.id).await.unwrap().is_none());
        assert!(store.remove_client(&client.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_client_leaves_projects() {
        let store = MemoryStore::new();
        let client = store.insert_client(ada()).await.unwrap();
        let project = store.insert_project(engine(client.id)).await.unwrap();

        store.remove_client(&client.id).await.unwrap();

        let kept = store.get_project(&project.id).await.unwrap().unwrap();
        assert_eq!(kept.client_id, client.id);
    }

    #[tokio::test]
    async fn insert_project_does_not_check_client() {
        let store = MemoryStore::new();
        let dangling = ClientId::new();
        let project = store.insert_project(engine(dangling)).await.unwrap();
        assert_eq!(project.client_id, dangling);
        assert_eq!(project.status, ProjectStatus::NotStarted);
    }

    #[tokio::test]
    async fn update_project_merges_supplied_fields() {
        let store = MemoryStore::new();
        let project = store.insert_project(engine(ClientId::new())).await.unwrap();

        let patch = ProjectPatch {
            status: Some(ProjectStatus::InProgress),
            ..Default::default()
        };
        let updated = store
            .update_project(&project.id, patch)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, ProjectStatus::InProgress);
        assert_eq!(updated.name, project.name);
        assert_eq!(updated.description, project.description);
        assert_eq!(updated.client_id, project.client_id);
        assert_eq!(
            store.get_project(&project.id).await.unwrap().unwrap(),
            updated
        );
    }

    #[tokio::test]
    async fn update_unknown_ids_is_absent() {
        let store = MemoryStore::new();
        let project = store
            .update_project(&ProjectId::new(), ProjectPatch::default())
            .await
            .unwrap();
        assert!(project.is_none());

        let client = store
            .update_client(&ClientId::new(), ClientPatch::default())
            .await
            .unwrap();
        assert!(client.is_none());
    }

    #[tokio::test]
    async fn update_client_merges_supplied_fields() {
        let store = MemoryStore::new();
        let client = store.insert_client(ada()).await.unwrap();

        let patch = ClientPatch {
            email: Some("ada@y.io".to_string()),
            ..Default::default()
        };
        let updated = store
            .update_client(&client.id, patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.email, "ada@y.io");
        assert_eq!(updated.name, "Ada");
        assert_eq!(updated.phone, "555-0100");
    }
}
