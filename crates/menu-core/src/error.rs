//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Menu with ID {0} not found")]
    MenuNotFound(Uuid),

    #[error("Parent menu not found")]
    ParentNotFound(Uuid),

    #[error("Invalid parent: menu {0} cannot be its own parent")]
    InvalidParent(Uuid),

    #[error("Invalid depth: Parent menu must have depth {expected_parent_depth}, but found {found}")]
    InvalidDepth { expected_parent_depth: i32, found: i32 },

    #[error("Invalid depth: Root menu must have depth 0, but received {0}")]
    InvalidRootDepth(i32),

    #[error("Invalid order: Expected order {expected}, but received {received}")]
    InvalidOrder { expected: i32, received: i32 },

    #[error("Invalid order: Order must be between 1 and {max}, but received {received}")]
    OrderOutOfRange { max: i32, received: i32 },

    #[error("Cannot change depth of menu ID {0} because it has children")]
    DepthChangeWithChildren(Uuid),

    #[error("Cannot delete menu ID {0} because it has children. Delete the children first.")]
    MenuHasChildren(Uuid),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
