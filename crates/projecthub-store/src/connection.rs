//! Neo4j connection management and the Neo4j-backed store.

use async_trait::async_trait;
use neo4rs::{ConfigBuilder, Graph, Query};

use projecthub_core::config::Neo4jConfig;
use projecthub_core::{
    Client, ClientId, ClientPatch, NewClient, NewProject, Project, ProjectId, ProjectPatch,
};

use crate::error::StoreError;
use crate::store::Store;

/// Thread-safe Neo4j store with connection pooling.
///
/// Clients and projects are stored as `:Client` and `:Project` nodes keyed by
/// their `id` property. A project's client is kept as a plain `clientId`
/// property rather than a relationship, so removing a client never touches
/// its projects.
///
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &Neo4jConfig) -> Result<Self, StoreError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Execute a write-only query.
    pub async fn run(&self, query: Query) -> Result<(), StoreError> {
        self.graph.run(query).await?;
        Ok(())
    }

    /// Execute a query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, StoreError> {
        let mut stream = self.graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a query and return the first row, if any.
    pub async fn query_one(&self, query: Query) -> Result<Option<neo4rs::Row>, StoreError> {
        let mut stream = self.graph.execute(query).await?;
        Ok(stream.next().await?)
    }
}

#[async_trait]
impl Store for Neo4jStore {
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        self.fetch_clients().await
    }

    async fn get_client(&self, id: &ClientId) -> Result<Option<Client>, StoreError> {
        self.fetch_client(id).await
    }

    async fn insert_client(&self, client: NewClient) -> Result<Client, StoreError> {
        self.create_client(client).await
    }

    async fn remove_client(&self, id: &ClientId) -> Result<Option<Client>, StoreError> {
        self.delete_client(id).await
    }

    async fn update_client(
        &self,
        id: &ClientId,
        patch: ClientPatch,
    ) -> Result<Option<Client>, StoreError> {
        self.patch_client(id, patch).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        self.fetch_projects().await
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        self.fetch_project(id).await
    }

    async fn insert_project(&self, project: NewProject) -> Result<Project, StoreError> {
        self.create_project(project).await
    }

    async fn remove_project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        self.delete_project(id).await
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, StoreError> {
        self.patch_project(id, patch).await
    }
}
