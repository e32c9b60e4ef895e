use orderdesk_core::{CustomerId, DomainError, EntityKind};
use orderdesk_parties::{Customer, NewCustomer};

use crate::services::error::ServiceResult;
use crate::store::{CustomerRepository, Store};

/// Customer registration and lookup.
#[derive(Debug)]
pub struct CustomerService<S> {
    store: S,
}

impl<S> CustomerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> CustomerService<S>
where
    S: Store,
{
    #[tracing::instrument(skip_all)]
    pub fn create_customer(&self, params: NewCustomer) -> ServiceResult<Customer> {
        let customer = Customer::new(params).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected customer registration");
        })?;

        let saved = self
            .store
            .transaction(|tx| -> ServiceResult<Customer> { Ok(tx.save_customer(customer)) })?;

        tracing::info!(customer_id = %saved.id_typed(), "customer registered");
        Ok(saved)
    }

    pub fn get_customer(&self, id: CustomerId) -> ServiceResult<Customer> {
        let customer = self.store.read(|tx| tx.get_customer(id))?;
        customer.ok_or_else(|| {
            DomainError::not_found("retrieving a customer", EntityKind::Customer, id).into()
        })
    }

    pub fn get_all_customers(&self) -> ServiceResult<Vec<Customer>> {
        Ok(self.store.read(|tx| tx.find_all_customers())?)
    }
}
