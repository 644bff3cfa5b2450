//! Read operations and row decoding for the Neo4j store.

use chrono::{DateTime, Utc};
use neo4rs::{query, Row};

use projecthub_core::{Client, ClientId, Project, ProjectId};

use crate::connection::Neo4jStore;
use crate::error::StoreError;

/// Column list returned by every client query, bound to `c`.
pub(crate) const CLIENT_COLUMNS: &str = "c.id AS id, c.name AS name, c.email AS email, \
     c.phone AS phone, c.created_at AS created_at";

/// Column list returned by every project query, bound to `p`.
pub(crate) const PROJECT_COLUMNS: &str = "p.id AS id, p.name AS name, \
     p.description AS description, p.status AS status, p.clientId AS client_id, \
     p.created_at AS created_at";

impl Neo4jStore {
    // ── Clients ──────────────────────────────────────────────────

    /// All clients in creation order.
    pub async fn fetch_clients(&self) -> Result<Vec<Client>, StoreError> {
        let q = query(&format!(
            "MATCH (c:Client)
             RETURN {CLIENT_COLUMNS}
             ORDER BY c.created_at"
        ));

        let rows = self.query_rows(q).await?;
        rows.iter().map(client_from_row).collect()
    }

    /// Get a client by id.
    pub async fn fetch_client(&self, id: &ClientId) -> Result<Option<Client>, StoreError> {
        let q = query(&format!(
            "MATCH (c:Client {{id: $id}})
             RETURN {CLIENT_COLUMNS}"
        ))
        .param("id", id.to_string());

        self.query_one(q).await?.as_ref().map(client_from_row).transpose()
    }

    // ── Projects ─────────────────────────────────────────────────

    /// All projects in creation order.
    pub async fn fetch_projects(&self) -> Result<Vec<Project>, StoreError> {
        let q = query(&format!(
            "MATCH (p:Project)
             RETURN {PROJECT_COLUMNS}
             ORDER BY p.created_at"
        ));

        let rows = self.query_rows(q).await?;
        rows.iter().map(project_from_row).collect()
    }

    /// Get a project by id.
    pub async fn fetch_project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        let q = query(&format!(
            "MATCH (p:Project {{id: $id}})
             RETURN {PROJECT_COLUMNS}"
        ))
        .param("id", id.to_string());

        self.query_one(q).await?.as_ref().map(project_from_row).transpose()
    }
}

/// Decode a row shaped by [`CLIENT_COLUMNS`].
pub(crate) fn client_from_row(row: &Row) -> Result<Client, StoreError> {
    Ok(Client {
        id: ClientId::parse(&text(row, "id")?)?,
        name: text(row, "name")?,
        email: text(row, "email")?,
        phone: text(row, "phone")?,
        created_at: timestamp(row, "created_at")?,
    })
}

/// Decode a row shaped by [`PROJECT_COLUMNS`].
pub(crate) fn project_from_row(row: &Row) -> Result<Project, StoreError> {
    Ok(Project {
        id: ProjectId::parse(&text(row, "id")?)?,
        name: text(row, "name")?,
        description: text(row, "description")?,
        status: text(row, "status")?.parse()?,
        client_id: ClientId::parse(&text(row, "client_id")?)?,
        created_at: timestamp(row, "created_at")?,
    })
}

fn text(row: &Row, column: &str) -> Result<String, StoreError> {
    row.get::<String>(column)
        .map_err(|e| StoreError::Serialization(format!("Failed to read column {column}: {e}")))
}

fn timestamp(row: &Row, column: &str) -> Result<DateTime<Utc>, StoreError> {
    let raw = text(row, column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Serialization(format!("Invalid {column} '{raw}': {e}")))
}
