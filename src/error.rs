//! Error taxonomy for the engine.
//!
//! "Nothing found" outcomes (no isomorphism, no library match) are ordinary
//! `Ok(None)` values, never errors. Errors are reserved for violated input
//! contracts, violated preconditions, and cancelled searches.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GroupError {
    /// The supplied multiplication table is not a group table: wrong shape,
    /// out-of-range entries, index 0 not acting as the identity, or a row or
    /// column that is not a permutation of all element indices.
    #[error("malformed multiplication table: {0}")]
    MalformedTable(String),

    /// A quotient was requested for a subgroup that is not normal in its
    /// parent group.
    #[error("subgroup is not normal in its parent group")]
    NotNormal,

    /// A subgroup enumeration or isomorphism search was cancelled by its
    /// token (stop flag tripped or deadline passed) before completing.
    #[error("search cancelled before completion")]
    Cancelled,

    /// A group definition could not be parsed.
    #[error("failed to parse group definition: {0}")]
    Parse(#[from] serde_json::Error),
}
