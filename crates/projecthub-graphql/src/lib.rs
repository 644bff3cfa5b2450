//! ProjectHub GraphQL: the query and mutation surface over the store.
//!
//! - [`types`]: the exposed shapes of clients and projects
//! - [`relation`]: lazy lookup of a project's client
//! - [`query`] / [`mutation`]: the root operations
//! - [`schema`]: one-time schema assembly
//! - [`dispatch`]: the flat "operation name + arguments" surface

pub mod dispatch;
pub mod error;
pub mod mutation;
pub mod query;
pub mod relation;
pub mod schema;
pub mod types;

pub use dispatch::{Dispatcher, Operation, OperationKind};
pub use error::DispatchError;
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use relation::resolve_client_for;
pub use schema::{build_schema, export_sdl, ProjectHubSchema};
