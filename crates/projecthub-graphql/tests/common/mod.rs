//! Store wrappers shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_graphql::{Request, Response, Variables};
use async_trait::async_trait;

use projecthub_core::{
    Client, ClientId, ClientPatch, NewClient, NewProject, Project, ProjectId, ProjectPatch,
};
use projecthub_graphql::{build_schema, ProjectHubSchema};
use projecthub_store::{MemoryStore, Store, StoreError};

/// Memory store that counts client lookups and writes.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    client_lookups: AtomicUsize,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn client_lookups(&self) -> usize {
        self.client_lookups.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.client_lookups.store(0, Ordering::SeqCst);
        self.writes.store(0, Ordering::SeqCst);
    }

    fn wrote(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Store for CountingStore {
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        self.inner.list_clients().await
    }

    async fn get_client(&self, id: &ClientId) -> Result<Option<Client>, StoreError> {
        self.client_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_client(id).await
    }

    async fn insert_client(&self, client: NewClient) -> Result<Client, StoreError> {
        self.wrote();
        self.inner.insert_client(client).await
    }

    async fn remove_client(&self, id: &ClientId) -> Result<Option<Client>, StoreError> {
        self.wrote();
        self.inner.remove_client(id).await
    }

    async fn update_client(
        &self,
        id: &ClientId,
        patch: ClientPatch,
    ) -> Result<Option<Client>, StoreError> {
        self.wrote();
        self.inner.update_client(id, patch).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        self.inner.list_projects().await
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        self.inner.get_project(id).await
    }

    async fn insert_project(&self, project: NewProject) -> Result<Project, StoreError> {
        self.wrote();
        self.inner.insert_project(project).await
    }

    async fn remove_project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        self.wrote();
        self.inner.remove_project(id).await
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, StoreError> {
        self.wrote();
        self.inner.update_project(id, patch).await
    }
}

/// Store whose every call fails as if the connection dropped.
pub struct OfflineStore;

fn offline<T>() -> Result<T, StoreError> {
    Err(StoreError::Connection("store offline".to_string()))
}

#[async_trait]
impl Store for OfflineStore {
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        offline()
    }

    async fn get_client(&self, _id: &ClientId) -> Result<Option<Client>, StoreError> {
        offline()
    }

    async fn insert_client(&self, _client: NewClient) -> Result<Client, StoreError> {
        offline()
    }

    async fn remove_client(&self, _id: &ClientId) -> Result<Option<Client>, StoreError> {
        offline()
    }

    async fn update_client(
        &self,
        _id: &ClientId,
        _patch: ClientPatch,
    ) -> Result<Option<Client>, StoreError> {
        offline()
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        offline()
    }

    async fn get_project(&self, _id: &ProjectId) -> Result<Option<Project>, StoreError> {
        offline()
    }

    async fn insert_project(&self, _project: NewProject) -> Result<Project, StoreError> {
        offline()
    }

    async fn remove_project(&self, _id: &ProjectId) -> Result<Option<Project>, StoreError> {
        offline()
    }

    async fn update_project(
        &self,
        _id: &ProjectId,
        _patch: ProjectPatch,
    ) -> Result<Option<Project>, StoreError> {
        offline()
    }
}

/// A schema over a fresh counting store, plus a handle to the store.
pub fn counting_schema() -> (ProjectHubSchema, Arc<CountingStore>) {
    let store = Arc::new(CountingStore::default());
    let schema = build_schema(store.clone());
    (schema, store)
}

pub async fn execute(
    schema: &ProjectHubSchema,
    query: &str,
    variables: serde_json::Value,
) -> Response {
    schema
        .execute(Request::new(query).variables(Variables::from_json(variables)))
        .await
}

/// Execute and return `data` as JSON, failing the test on any error.
pub async fn execute_ok(
    schema: &ProjectHubSchema,
    query: &str,
    variables: serde_json::Value,
) -> serde_json::Value {
    let response = execute(schema, query, variables).await;
    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    response.data.into_json().unwrap()
}
