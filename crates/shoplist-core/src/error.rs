//! Error taxonomy shared by every mutator.

use crate::auth::Denial;
use thiserror::Error;

/// Result alias for service operations.
pub type Result<T> = std::result::Result<T, ShopError>;

/// Kind of document a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    ShoppingList,
    ShoppingItem,
    User,
}

impl Resource {
    /// Stable machine-readable code reported when the resource is absent.
    pub fn not_found_code(self) -> &'static str {
        match self {
            Resource::ShoppingList => "shoppingListDoesNotExist",
            Resource::ShoppingItem => "itemNotFound",
            Resource::User => "userNotFound",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Resource::ShoppingList => "Shopping list",
            Resource::ShoppingItem => "Shopping item",
            Resource::User => "User",
        }
    }
}

#[derive(Debug, Error)]
pub enum ShopError {
    /// Missing or malformed caller identity.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Role gate or ownership policy denied the action.
    #[error("Forbidden: {0}")]
    Forbidden(Denial),

    #[error("{} {id} not found", .resource.label())]
    NotFound { resource: Resource, id: String },

    #[error("Invalid input: {message}")]
    InvalidInput { code: &'static str, message: String },

    #[error("Conflict: {message}")]
    Conflict { code: &'static str, message: String },

    /// Opaque storage-layer failure, never classified further.
    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl ShopError {
    pub fn not_found(resource: Resource, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn invalid_input(code: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            code,
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    /// Stable error category code.
    pub fn code(&self) -> &'static str {
        match self {
            ShopError::Unauthenticated(_) => "unauthenticated",
            ShopError::Forbidden(_) => "forbidden",
            ShopError::NotFound { .. } => "notFound",
            ShopError::InvalidInput { .. } => "invalidInput",
            ShopError::Conflict { .. } => "conflict",
            ShopError::Storage(_) => "storageFailure",
        }
    }

    /// Finer-grained reason code, when the category carries one.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            ShopError::Forbidden(denial) => Some(denial.code()),
            ShopError::NotFound { resource, .. } => Some(resource.not_found_code()),
            ShopError::InvalidInput { code, .. } | ShopError::Conflict { code, .. } => Some(*code),
            ShopError::Unauthenticated(_) | ShopError::Storage(_) => None,
        }
    }
}
