//! Error types for the todo client.
//!
//! # Design
//! The list/mutation paths never branch on HTTP status codes: a request
//! either failed to complete (`Transport`) or produced a body we could not
//! decode. `NotFound` is only produced by the single-item read.
//! `ControllerError` wraps these for the controller, which adds its own
//! lifecycle failure.

use thiserror::Error;

/// Errors produced while building, executing, or parsing API calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (network failure, aborted
    /// fetch, refused connection).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered a single-item read with 404.
    #[error("resource not found")]
    NotFound,

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Errors returned by [`Controller`](crate::controller::Controller)
/// operations. Any error means the operation's chain stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// `init` was called more than once.
    #[error("controller already initialized")]
    AlreadyInitialized,
}
