//! Core entity types for ProjectHub.
//!
//! Two record kinds live in the store: clients and the projects that reference
//! them. A project's `client_id` is a weak reference: nothing checks that the
//! client exists, and removing a client leaves its projects untouched.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

// ── Identifiers ───────────────────────────────────────────────────

/// Store-assigned identifier of a client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClientId(pub Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the hyphenated string form produced by `Display`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        parse_uuid("client", raw).map(Self)
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Store-assigned identifier of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the hyphenated string form produced by `Display`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        parse_uuid("project", raw).map(Self)
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

fn parse_uuid(kind: &'static str, raw: &str) -> Result<Uuid, CoreError> {
    Uuid::parse_str(raw).map_err(|source| CoreError::InvalidId {
        kind,
        value: raw.to_string(),
        source,
    })
}

// ── Status ────────────────────────────────────────────────────────

/// Lifecycle state of a project.
///
/// Each state has its own canonical text value, which is what gets stored
/// and what the API reports.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [Self::NotStarted, Self::InProgress, Self::Completed];

    /// The canonical text value of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::InvalidStatus(s.to_string()))
    }
}

// ── Records ───────────────────────────────────────────────────────

/// A client record as held by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

/// A project record as held by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub client_id: ClientId,
    pub created_at: DateTime<Utc>,
}

// ── Inserts ───────────────────────────────────────────────────────

/// Fields supplied when adding a client. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl NewClient {
    pub fn into_record(self, id: ClientId, created_at: DateTime<Utc>) -> Client {
        Client {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            created_at,
        }
    }
}

/// Fields supplied when adding a project. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    pub client_id: ClientId,
}

impl NewProject {
    pub fn into_record(self, id: ProjectId, created_at: DateTime<Utc>) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            status: self.status,
            client_id: self.client_id,
            created_at,
        }
    }
}

// ── Patches ───────────────────────────────────────────────────────

/// Partial update for a client. `None` means "not supplied".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ClientPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }

    /// Merge the supplied fields into `client`.
    pub fn apply(self, client: &mut Client) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(email) = self.email {
            client.email = email;
        }
        if let Some(phone) = self.phone {
            client.phone = phone;
        }
    }
}

/// Partial update for a project. `None` means "not supplied".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub client_id: Option<ClientId>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.client_id.is_none()
    }

    /// Names of the fields this patch will touch, in declaration order.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        if self.client_id.is_some() {
            fields.push("clientId");
        }
        fields
    }

    /// Merge the supplied fields into `project`.
    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(client_id) = self.client_id {
            project.client_id = client_id;
        }
    }
}
