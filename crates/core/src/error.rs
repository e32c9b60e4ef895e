//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Kind of entity referenced by a [`DomainError::NotFound`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Customer,
    Item,
    Order,
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            EntityKind::Customer => "Customer",
            EntityKind::Item => "Item",
            EntityKind::Order => "Order",
        };
        f.write_str(name)
    }
}

/// Domain-level error.
///
/// Every variant is terminal for the current request: nothing in the domain or
/// service layer retries. Infrastructure failures belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A structural or referential precondition failed for a whole entity.
    #[error("During {context}, the following entity was found to be invalid: {entity}")]
    InvalidEntity { context: String, entity: String },

    /// A required reference does not exist.
    #[error("During {context}, the following entity was not found: {kind} with id = {id}")]
    NotFound {
        context: String,
        kind: EntityKind,
        id: String,
    },

    /// Ownership check failed.
    #[error("{0}")]
    NotAuthorized(String),

    /// A single value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_entity(context: impl Into<String>, entity: impl core::fmt::Debug) -> Self {
        Self::InvalidEntity {
            context: context.into(),
            entity: format!("{entity:?}"),
        }
    }

    pub fn not_found(
        context: impl Into<String>,
        kind: EntityKind,
        id: impl core::fmt::Display,
    ) -> Self {
        Self::NotFound {
            context: context.into(),
            kind,
            id: id.to_string(),
        }
    }

    pub fn not_authorized(msg: impl Into<String>) -> Self {
        Self::NotAuthorized(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
