//! Failure taxonomy for the domain layer.
//!
//! Repositories and handlers surface problems through these variants; the
//! HTTP layer decides which status code and wire message each one becomes.
//! Payloads carry human-readable context only, never driver internals.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A lookup by primary key found nothing.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// Client input failed a shape or range check.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The request collides with existing state (duplicate email,
    /// duplicate store name).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing or unverifiable credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but the caller's role does not permit the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A fault the client can do nothing about.
    #[error("internal error: {0}")]
    Internal(String),
}
