//! HTTP transport for the ProjectHub API.
//!
//! Serves the GraphQL endpoint, the optional playground, and the flat
//! operation surface over axum.

pub mod routes;

pub use routes::{router, AppState, RpcError};
