//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HelloError`]
//! via `From`.

/// Top-level error shared by the application layer and its adapters.
#[derive(Debug, thiserror::Error)]
pub enum HelloError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Opaque failure from a persistence adapter.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A lookup that an outer layer requires to succeed found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Kind of record that was looked up (e.g. `"User"`).
    pub entity: &'static str,
    /// The identifier that was requested, rendered as text.
    pub id: String,
}
