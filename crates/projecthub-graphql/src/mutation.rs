//! Write operations. Each one touches exactly one record.

use async_graphql::{Context, Object, Result, ID};

use projecthub_core::{ClientId, NewClient, NewProject, ProjectId, ProjectPatch};

use crate::error::{bad_argument, store_failure};
use crate::schema::store_of;
use crate::types::{ClientView, ProjectView, StatusLabel};

#[derive(Debug, Clone, Copy, Default)]
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Add a client.
    async fn add_client(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        phone: String,
    ) -> Result<ClientView> {
        let client = store_of(ctx)?
            .insert_client(NewClient { name, email, phone })
            .await
            .map_err(store_failure)?;

        tracing::info!(client_id = %client.id, "Client added");
        Ok(ClientView(client))
    }

    /// Delete a client. Projects that reference it are left alone.
    async fn delete_client(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ClientView>> {
        let id = ClientId::parse(&id).map_err(|e| bad_argument("id", e))?;
        let removed = store_of(ctx)?
            .remove_client(&id)
            .await
            .map_err(store_failure)?;

        tracing::info!(client_id = %id, found = removed.is_some(), "Client deleted");
        Ok(removed.map(ClientView))
    }

    /// Add a project. Status defaults to "Not Started"; the client id is
    /// stored without checking that the client exists.
    async fn add_project(
        &self,
        ctx: &Context<'_>,
        name: String,
        description: String,
        status: Option<StatusLabel>,
        client_id: ID,
    ) -> Result<ProjectView> {
        let client_id = ClientId::parse(&client_id).map_err(|e| bad_argument("clientId", e))?;
        let new = NewProject {
            name,
            description,
            status: status.map(Into::into).unwrap_or_default(),
            client_id,
        };
        let project = store_of(ctx)?
            .insert_project(new)
            .await
            .map_err(store_failure)?;

        tracing::info!(project_id = %project.id, client_id = %project.client_id, "Project added");
        Ok(ProjectView(project))
    }

    /// Delete a project.
    async fn delete_project(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ProjectView>> {
        let id = ProjectId::parse(&id).map_err(|e| bad_argument("id", e))?;
        let removed = store_of(ctx)?
            .remove_project(&id)
            .await
            .map_err(store_failure)?;

        tracing::info!(project_id = %id, found = removed.is_some(), "Project deleted");
        Ok(removed.map(ProjectView))
    }

    /// Update the supplied fields of a project, or return null if it does
    /// not exist.
    async fn update_project(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        description: Option<String>,
        status: Option<StatusLabel>,
        client_id: Option<ID>,
    ) -> Result<Option<ProjectView>> {
        let id = ProjectId::parse(&id).map_err(|e| bad_argument("id", e))?;
        let client_id = client_id
            .map(|raw| ClientId::parse(&raw))
            .transpose()
            .map_err(|e| bad_argument("clientId", e))?;

        let patch = ProjectPatch {
            name,
            description,
            status: status.map(Into::into),
            client_id,
        };
        let fields = patch.changed_fields();
        let updated = store_of(ctx)?
            .update_project(&id, patch)
            .await
            .map_err(store_failure)?;

        tracing::info!(project_id = %id, ?fields, found = updated.is_some(), "Project updated");
        Ok(updated.map(ProjectView))
    }
}
