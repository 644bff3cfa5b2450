//! Error types for the projecthub-graphql crate.

use async_graphql::ErrorExtensions;
use thiserror::Error;

use projecthub_store::StoreError;

/// Errors from the flat operation surface.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Operation {operation} does not accept argument '{argument}'")]
    UnexpectedArgument {
        operation: &'static str,
        argument: String,
    },

    #[error("Operation {operation} requires argument '{argument}'")]
    MissingArgument {
        operation: &'static str,
        argument: &'static str,
    },

    #[error("Invalid value for argument '{argument}' of {operation}: {reason}")]
    InvalidArguments {
        operation: &'static str,
        argument: String,
        reason: String,
    },

    #[error("Operation {operation} failed: {}", .messages.join("; "))]
    Execution {
        operation: &'static str,
        messages: Vec<String>,
    },
}

impl DispatchError {
    /// Whether the caller supplied a bad request, as opposed to the operation
    /// failing while it ran.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedArgument { .. }
                | Self::MissingArgument { .. }
                | Self::InvalidArguments { .. }
        )
    }
}

/// A GraphQL error naming the offending argument.
pub(crate) fn bad_argument(
    argument: &'static str,
    reason: impl std::fmt::Display,
) -> async_graphql::Error {
    async_graphql::Error::new(format!("Invalid value for argument \"{argument}\": {reason}"))
        .extend_with(|_, e| {
            e.set("code", "BAD_USER_INPUT");
            e.set("argument", argument);
        })
}

/// Surface a store failure with its message unchanged.
pub(crate) fn store_failure(err: StoreError) -> async_graphql::Error {
    tracing::error!(error = %err, "Store operation failed");
    async_graphql::Error::new(err.to_string()).extend_with(|_, e| e.set("code", "STORE_ERROR"))
}
