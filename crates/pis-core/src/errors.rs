//! Cross-cutting error types.
//!
//! Storage errors live in `pis-db` as `DatabaseError`; the CLI converges
//! everything into `anyhow`.

use thiserror::Error;

/// Errors raised by core payload checks. Lookups and conflicts need the
/// store and are reported by `DatabaseError`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Payload failed validation (missing required field, unknown key, bad type).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
