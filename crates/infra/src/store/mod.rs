//! Persistence boundary: repositories and transaction scopes.
//!
//! Services never touch storage directly. They open a [`Store::read`] or
//! [`Store::transaction`] scope and work against a [`UnitOfWork`], which
//! exposes the customer, item and order repositories together. Everything
//! done inside one transaction commits or rolls back as a unit.

pub mod in_memory;
pub mod repository;

pub use in_memory::{InMemoryState, InMemoryStore};
pub use repository::{CustomerRepository, ItemRepository, OrderRepository, UnitOfWork};

use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A previous transaction panicked while holding the store.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Transactional access to the repositories.
pub trait Store: Send + Sync {
    type Tx: UnitOfWork;

    /// Run `f` against a consistent snapshot.
    fn read<T>(&self, f: impl FnOnce(&Self::Tx) -> T) -> Result<T, StoreError>;

    /// Run `f` atomically and in isolation from other transactions.
    ///
    /// Changes made through the unit of work become visible only if `f`
    /// returns `Ok`; any error discards all of them.
    fn transaction<T, E>(&self, f: impl FnOnce(&mut Self::Tx) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>;
}

impl<S> Store for Arc<S>
where
    S: Store,
{
    type Tx = S::Tx;

    fn read<T>(&self, f: impl FnOnce(&Self::Tx) -> T) -> Result<T, StoreError> {
        (**self).read(f)
    }

    fn transaction<T, E>(&self, f: impl FnOnce(&mut Self::Tx) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        (**self).transaction(f)
    }
}
