//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree invariants.
/// The expand/collapse mutations themselves never fail; these are raised
/// only when a tree is constructed or validated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate name '{name}' under '{parent}'")]
    DuplicateName { parent: String, name: String },

    #[error("empty node name under '{parent}'")]
    EmptyName { parent: String },

    #[error("node name '{name}' must not contain '/'")]
    InvalidName { name: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
