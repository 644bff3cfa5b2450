//! Write operations for the Neo4j store.
//!
//! Inserts use CREATE with a freshly generated id. Removals snapshot the
//! node's columns before deleting it so the removed record can be returned.
//! Updates only SET the properties a patch actually supplies.

use chrono::Utc;
use neo4rs::query;

use projecthub_core::{
    Client, ClientId, ClientPatch, NewClient, NewProject, Project, ProjectId, ProjectPatch,
};

use crate::connection::Neo4jStore;
use crate::error::StoreError;
use crate::queries::{client_from_row, project_from_row, CLIENT_COLUMNS, PROJECT_COLUMNS};

impl Neo4jStore {
    // ── Clients ──────────────────────────────────────────────────

    /// Create a Client node.
    pub async fn create_client(&self, client: NewClient) -> Result<Client, StoreError> {
        let id = ClientId::new();
        let q = query(&format!(
            "CREATE (c:Client {{
               id: $id, name: $name, email: $email, phone: $phone, created_at: $now
             }})
             RETURN {CLIENT_COLUMNS}"
        ))
        .param("id", id.to_string())
        .param("name", client.name)
        .param("email", client.email)
        .param("phone", client.phone)
        .param("now", Utc::now().to_rfc3339());

        let row = self.query_one(q).await?.ok_or_else(|| {
            StoreError::Serialization(format!("CREATE returned no row for client {id}"))
        })?;
        client_from_row(&row)
    }

    /// Delete a Client node, returning its last state.
    pub async fn delete_client(&self, id: &ClientId) -> Result<Option<Client>, StoreError> {
        let q = query(
            "MATCH (c:Client {id: $id})
             WITH c, c.id AS id, c.name AS name, c.email AS email,
                  c.phone AS phone, c.created_at AS created_at
             DETACH DELETE c
             RETURN id, name, email, phone, created_at",
        )
        .param("id", id.to_string());

        self.query_one(q).await?.as_ref().map(client_from_row).transpose()
    }

    /// Set the supplied client properties.
    pub async fn patch_client(
        &self,
        id: &ClientId,
        patch: ClientPatch,
    ) -> Result<Option<Client>, StoreError> {
        let mut sets = Vec::new();
        if let Some(name) = patch.name {
            sets.push(("name", name));
        }
        if let Some(email) = patch.email {
            sets.push(("email", email));
        }
        if let Some(phone) = patch.phone {
            sets.push(("phone", phone));
        }

        let cypher = format!(
            "MATCH (c:Client {{id: $id}})
             {}
             RETURN {CLIENT_COLUMNS}",
            set_clause("c", &sets)
        );
        let mut q = query(&cypher).param("id", id.to_string());
        for (property, value) in sets {
            q = q.param(property, value);
        }

        self.query_one(q).await?.as_ref().map(client_from_row).transpose()
    }

    // ── Projects ─────────────────────────────────────────────────

    /// Create a Project node. `clientId` is stored as given.
    pub async fn create_project(&self, project: NewProject) -> Result<Project, StoreError> {
        let id = ProjectId::new();
        let q = query(&format!(
            "CREATE (p:Project {{
               id: $id, name: $name, description: $description,
               status: $status, clientId: $client_id, created_at: $now
             }})
             RETURN {PROJECT_COLUMNS}"
        ))
        .param("id", id.to_string())
        .param("name", project.name)
        .param("description", project.description)
        .param("status", project.status.as_str().to_string())
        .param("client_id", project.client_id.to_string())
        .param("now", Utc::now().to_rfc3339());

        let row = self.query_one(q).await?.ok_or_else(|| {
            StoreError::Serialization(format!("CREATE returned no row for project {id}"))
        })?;
        project_from_row(&row)
    }

    /// Delete a Project node, returning its last state.
    pub async fn delete_project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        let q = query(
            "MATCH (p:Project {id: $id})
             WITH p, p.id AS id, p.name AS name, p.description AS description,
                  p.status AS status, p.clientId AS client_id, p.created_at AS created_at
             DETACH DELETE p
             RETURN id, name, description, status, client_id, created_at",
        )
        .param("id", id.to_string());

        self.query_one(q).await?.as_ref().map(project_from_row).transpose()
    }

    /// Set the supplied project properties.
    pub async fn patch_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, StoreError> {
        let mut sets = Vec::new();
        if let Some(name) = patch.name {
            sets.push(("name", name));
        }
        if let Some(description) = patch.description {
            sets.push(("description", description));
        }
        if let Some(status) = patch.status {
            sets.push(("status", status.as_str().to_string()));
        }
        if let Some(client_id) = patch.client_id {
            sets.push(("clientId", client_id.to_string()));
        }

        let cypher = format!(
            "MATCH (p:Project {{id: $id}})
             {}
             RETURN {PROJECT_COLUMNS}",
            set_clause("p", &sets)
        );
        let mut q = query(&cypher).param("id", id.to_string());
        for (property, value) in sets {
            q = q.param(property, value);
        }

        self.query_one(q).await?.as_ref().map(project_from_row).transpose()
    }
}

// ── Helpers ──────────────────────────────────────────────────────

/// Build `SET n.a = $a, n.b = $b` for the supplied properties, or nothing.
fn set_clause(var: &str, sets: &[(&str, String)]) -> String {
    if sets.is_empty() {
        return String::new();
    }
    let assignments: Vec<String> = sets
        .iter()
        .map(|(property, _)| format!("{var}.{property} = ${property}"))
        .collect();
    format!("SET {}", assignments.join(", "))
}
