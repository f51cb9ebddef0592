//! Domain layer: entities and tree logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;
pub mod mutate;
pub mod query;

pub use builder::TreeBuilder;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use mutate::{collapse_all, expand_all, replace_children, set_expanded};
pub use query::VisibleRow;
