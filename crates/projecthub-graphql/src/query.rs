//! Read operations.

use async_graphql::{Context, Object, Result, ID};

use projecthub_core::{ClientId, ProjectId};

use crate::error::{bad_argument, store_failure};
use crate::schema::store_of;
use crate::types::{ClientView, ProjectView};

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryRoot;

#[Object(name = "RootQueryType")]
impl QueryRoot {
    /// Every client.
    async fn clients(&self, ctx: &Context<'_>) -> Result<Vec<ClientView>> {
        let clients = store_of(ctx)?.list_clients().await.map_err(store_failure)?;
        Ok(clients.into_iter().map(ClientView).collect())
    }

    /// The client with this id, or null.
    async fn client(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ClientView>> {
        let id = ClientId::parse(&id).map_err(|e| bad_argument("id", e))?;
        let client = store_of(ctx)?.get_client(&id).await.map_err(store_failure)?;
        Ok(client.map(ClientView))
    }

    /// Every project.
    async fn projects(&self, ctx: &Context<'_>) -> Result<Vec<ProjectView>> {
        let projects = store_of(ctx)?.list_projects().await.map_err(store_failure)?;
        Ok(projects.into_iter().map(ProjectView).collect())
    }

    /// The project with this id, or null.
    async fn project(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ProjectView>> {
        let id = ProjectId::parse(&id).map_err(|e| bad_argument("id", e))?;
        let project = store_of(ctx)?.get_project(&id).await.map_err(store_failure)?;
        Ok(project.map(ProjectView))
    }
}
