//! Parties domain module: the customers that place orders.
//!
//! Customers carry identity and contact details only; once created they are
//! not modified by the order lifecycle.

pub mod customer;

pub use customer::{Address, Customer, Email, NewCustomer, PhoneNumber};
