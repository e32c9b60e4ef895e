use thiserror::Error;

use orderdesk_core::DomainError;

use crate::store::StoreError;

/// Failure of a service operation.
///
/// Domain errors are the expected, client-facing outcomes; store errors mean
/// the infrastructure itself is unhealthy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            ServiceError::Domain(e) => Some(e),
            ServiceError::Store(_) => None,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
