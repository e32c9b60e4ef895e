//! Sales orders domain module.
//!
//! This crate contains the order aggregate, its lines, the shipping-date
//! policy and the events raised when an order is placed. It is pure domain
//! logic (no IO, no storage).

pub mod line;
pub mod order;
pub mod shipping;

pub use line::{OrderLine, OrderLinePlanner};
pub use order::{
    NewOrder, Order, OrderPlaced, OrderValidator, RequestedLine, SalesEvent,
    StockDecrementRequested,
};
pub use shipping::ShippingPolicy;
