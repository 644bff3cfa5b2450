//! projecthub-core: Shared types, configuration, and error handling for ProjectHub.
//!
//! This crate provides the foundational types used across all ProjectHub crates:
//! - Entity records (Client, Project) and their identifiers
//! - The project lifecycle status enumeration
//! - Insert payloads and partial-update patches
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use error::CoreError;
pub use types::{
    Client, ClientId, ClientPatch, NewClient, NewProject, Project, ProjectId, ProjectPatch,
    ProjectStatus,
};
