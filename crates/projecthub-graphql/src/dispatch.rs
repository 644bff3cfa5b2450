//! Flat operation surface: an operation name plus a map of named arguments.
//!
//! Every operation is an entry in a fixed table. An entry knows its kind, the
//! arguments it requires and accepts, and the persisted GraphQL document it
//! runs. Arguments are checked against the table before anything reaches the
//! store; the document then executes against the assembled schema, so this
//! surface and `/graphql` share the same resolvers.

use std::str::FromStr;

use async_graphql::{Request, Variables};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::DispatchError;
use crate::schema::ProjectHubSchema;

/// Labels accepted for `status`, as declared by the `ProjectStatus` enum.
const STATUS_LABELS: [&str; 3] = ["new", "progress", "completed"];

macro_rules! client_fields {
    () => {
        "id name email phone"
    };
}

macro_rules! project_fields {
    () => {
        concat!(
            "id name description status clientId client { ",
            client_fields!(),
            " }"
        )
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListClients,
    GetClient,
    ListProjects,
    GetProject,
    AddClient,
    DeleteClient,
    AddProject,
    DeleteProject,
    UpdateProject,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Self::ListClients,
        Self::GetClient,
        Self::ListProjects,
        Self::GetProject,
        Self::AddClient,
        Self::DeleteClient,
        Self::AddProject,
        Self::DeleteProject,
        Self::UpdateProject,
    ];

    /// Kebab-case operation name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListClients => "list-clients",
            Self::GetClient => "get-client",
            Self::ListProjects => "list-projects",
            Self::GetProject => "get-project",
            Self::AddClient => "add-client",
            Self::DeleteClient => "delete-client",
            Self::AddProject => "add-project",
            Self::DeleteProject => "delete-project",
            Self::UpdateProject => "update-project",
        }
    }

    /// The root field the operation's document selects.
    pub fn field(&self) -> &'static str {
        match self {
            Self::ListClients => "clients",
            Self::GetClient => "client",
            Self::ListProjects => "projects",
            Self::GetProject => "project",
            Self::AddClient => "addClient",
            Self::DeleteClient => "deleteClient",
            Self::AddProject => "addProject",
            Self::DeleteProject => "deleteProject",
            Self::UpdateProject => "updateProject",
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::ListClients | Self::GetClient | Self::ListProjects | Self::GetProject => {
                OperationKind::Query
            }
            _ => OperationKind::Mutation,
        }
    }

    pub fn required_args(&self) -> &'static [&'static str] {
        match self {
            Self::ListClients | Self::ListProjects => &[],
            Self::GetClient
            | Self::GetProject
            | Self::DeleteClient
            | Self::DeleteProject
            | Self::UpdateProject => &["id"],
            Self::AddClient => &["name", "email", "phone"],
            Self::AddProject => &["name", "description", "clientId"],
        }
    }

    pub fn optional_args(&self) -> &'static [&'static str] {
        match self {
            Self::AddProject => &["status"],
            Self::UpdateProject => &["name", "description", "status", "clientId"],
            _ => &[],
        }
    }

    /// The persisted GraphQL document this operation executes.
    pub fn document(&self) -> &'static str {
        match self {
            Self::ListClients => concat!("query ListClients { clients { ", client_fields!(), " } }"),
            Self::GetClient => concat!(
                "query GetClient($id: ID!) { client(id: $id) { ",
                client_fields!(),
                " } }"
            ),
            Self::ListProjects => concat!(
                "query ListProjects { projects { ",
                project_fields!(),
                " } }"
            ),
            Self::GetProject => concat!(
                "query GetProject($id: ID!) { project(id: $id) { ",
                project_fields!(),
                " } }"
            ),
            Self::AddClient => concat!(
                "mutation AddClient($name: String!, $email: String!, $phone: String!) { ",
                "addClient(name: $name, email: $email, phone: $phone) { ",
                client_fields!(),
                " } }"
            ),
            Self::DeleteClient => concat!(
                "mutation DeleteClient($id: ID!) { deleteClient(id: $id) { ",
                client_fields!(),
                " } }"
            ),
            Self::AddProject => concat!(
                "mutation AddProject($name: String!, $description: String!, ",
                "$status: ProjectStatus, $clientId: ID!) { ",
                "addProject(name: $name, description: $description, ",
                "status: $status, clientId: $clientId) { ",
                project_fields!(),
                " } }"
            ),
            Self::DeleteProject => concat!(
                "mutation DeleteProject($id: ID!) { deleteProject(id: $id) { ",
                project_fields!(),
                " } }"
            ),
            Self::UpdateProject => concat!(
                "mutation UpdateProject($id: ID!, $name: String, $description: String, ",
                "$status: ProjectStatus, $clientId: ID) { ",
                "updateProject(id: $id, name: $name, description: $description, ",
                "status: $status, clientId: $clientId) { ",
                project_fields!(),
                " } }"
            ),
        }
    }

    /// Find an operation by kebab-case name or by root field name.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name || op.field() == name)
    }

    /// Check supplied arguments against the table entry.
    ///
    /// Unknown arguments are rejected first, then missing (or null) required
    /// ones, then values of the wrong shape. Every argument is textual; `id`
    /// and `clientId` must also be well-formed identifiers and `status` one of
    /// the enum labels.
    pub fn validate(&self, args: &Map<String, Value>) -> Result<(), DispatchError> {
        let required = self.required_args();
        let optional = self.optional_args();

        if let Some(extra) = args
            .keys()
            .find(|k| !required.contains(&k.as_str()) && !optional.contains(&k.as_str()))
        {
            return Err(DispatchError::UnexpectedArgument {
                operation: self.name(),
                argument: extra.clone(),
            });
        }

        for &argument in required {
            if matches!(args.get(argument), None | Some(Value::Null)) {
                return Err(DispatchError::MissingArgument {
                    operation: self.name(),
                    argument,
                });
            }
        }

        for (argument, value) in args {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                other => {
                    return Err(self.invalid(argument, format!("expected a string, got {other}")))
                }
            };
            match argument.as_str() {
                "id" | "clientId" => {
                    Uuid::parse_str(text).map_err(|e| self.invalid(argument, e.to_string()))?;
                }
                "status" if !STATUS_LABELS.contains(&text.as_str()) => {
                    return Err(self.invalid(
                        argument,
                        format!("expected one of {}", STATUS_LABELS.join(", ")),
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn invalid(&self, argument: &str, reason: String) -> DispatchError {
        DispatchError::InvalidArguments {
            operation: self.name(),
            argument: argument.to_string(),
            reason,
        }
    }
}

impl FromStr for Operation {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| DispatchError::UnknownOperation(s.to_string()))
    }
}

/// Runs table operations against the assembled schema.
#[derive(Clone)]
pub struct Dispatcher {
    schema: ProjectHubSchema,
}

impl Dispatcher {
    pub fn new(schema: ProjectHubSchema) -> Self {
        Self { schema }
    }

    /// Validate and execute one operation.
    ///
    /// Returns the operation's result as JSON; an absent record is `null`.
    pub async fn dispatch(
        &self,
        name: &str,
        args: Map<String, Value>,
    ) -> Result<Value, DispatchError> {
        let operation: Operation = name.parse()?;
        operation.validate(&args)?;

        tracing::debug!(operation = operation.name(), kind = ?operation.kind(), "Dispatching");

        let request = Request::new(operation.document())
            .operation_name(document_name(operation))
            .variables(Variables::from_json(Value::Object(args)));
        let response = self.schema.execute(request).await;

        if !response.errors.is_empty() {
            return Err(DispatchError::Execution {
                operation: operation.name(),
                messages: response.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        let mut data = response
            .data
            .into_json()
            .map_err(|e| DispatchError::Execution {
                operation: operation.name(),
                messages: vec![e.to_string()],
            })?;

        Ok(data
            .get_mut(operation.field())
            .map(Value::take)
            .unwrap_or(Value::Null))
    }
}

/// The operation name declared inside the persisted document.
fn document_name(operation: Operation) -> &'static str {
    match operation {
        Operation::ListClients => "ListClients",
        Operation::GetClient => "GetClient",
        Operation::ListProjects => "ListProjects",
        Operation::GetProject => "GetProject",
        Operation::AddClient => "AddClient",
        Operation::DeleteClient => "DeleteClient",
        Operation::AddProject => "AddProject",
        Operation::DeleteProject => "DeleteProject",
        Operation::UpdateProject => "UpdateProject",
    }
}
