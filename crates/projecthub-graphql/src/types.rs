//! Exposed shapes of clients and projects.
//!
//! Each view wraps a store record and exposes exactly the declared fields.
//! Anything else on the record (such as `created_at`) stays hidden.

use async_graphql::{Context, Enum, Object, Result, ID};

use projecthub_core::{Client, Project, ProjectStatus};

use crate::error::store_failure;
use crate::relation::resolve_client_for;
use crate::schema::store_of;

/// GraphQL view of a [`Client`].
#[derive(Debug, Clone)]
pub struct ClientView(pub Client);

#[Object(name = "Client")]
impl ClientView {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn phone(&self) -> &str {
        &self.0.phone
    }
}

/// GraphQL view of a [`Project`].
#[derive(Debug, Clone)]
pub struct ProjectView(pub Project);

#[Object(name = "Project")]
impl ProjectView {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    /// Canonical text of the lifecycle status, e.g. "Not Started".
    async fn status(&self) -> &'static str {
        self.0.status.as_str()
    }

    async fn client_id(&self) -> ID {
        ID(self.0.client_id.to_string())
    }

    /// The referenced client, or null when no such client exists.
    ///
    /// Looked up once per project on every request that selects it.
    async fn client(&self, ctx: &Context<'_>) -> Result<Option<ClientView>> {
        let store = store_of(ctx)?;
        let client = resolve_client_for(&self.0, store.as_ref())
            .await
            .map_err(store_failure)?;
        Ok(client.map(ClientView))
    }
}

/// Status labels accepted as arguments.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "ProjectStatus")]
pub enum StatusLabel {
    /// Not Started
    #[graphql(name = "new")]
    New,
    /// In Progress
    #[graphql(name = "progress")]
    Progress,
    /// Completed
    #[graphql(name = "completed")]
    Completed,
}

impl From<StatusLabel> for ProjectStatus {
    fn from(label: StatusLabel) -> Self {
        match label {
            StatusLabel::New => ProjectStatus::NotStarted,
            StatusLabel::Progress => ProjectStatus::InProgress,
            StatusLabel::Completed => ProjectStatus::Completed,
        }
    }
}
