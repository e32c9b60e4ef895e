use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use orderdesk_core::{CustomerId, DomainError, DomainResult, Entity, ItemId, OrderId, Price};
use orderdesk_events::Event;

use crate::line::OrderLine;

/// One requested item/quantity pair of a [`NewOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedLine {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Unpersisted order as submitted by a caller.
///
/// Lines carry only references and quantities; prices and shipping dates are
/// derived from the items when the order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub lines: Vec<RequestedLine>,
}

/// Structural validation of order requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderValidator;

impl OrderValidator {
    /// A nil customer id stands for a missing customer reference.
    pub fn is_valid_for_creation(&self, order: &NewOrder) -> bool {
        !order.customer_id.as_uuid().is_nil()
            && !order.lines.is_empty()
            && order.lines.iter().all(|line| line.quantity > 0)
    }

    pub fn validate_for_creation(&self, order: &NewOrder) -> DomainResult<()> {
        if self.is_valid_for_creation(order) {
            Ok(())
        } else {
            Err(DomainError::invalid_entity("creation of a new order", order))
        }
    }
}

/// Aggregate root: Order.
///
/// Owns its lines outright and references the customer by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    lines: Vec<OrderLine>,
}

impl Order {
    /// New order with a freshly generated id.
    pub fn new(customer_id: CustomerId, lines: Vec<OrderLine>) -> Self {
        Self::from_parts(OrderId::new(), customer_id, lines)
    }

    pub fn from_parts(id: OrderId, customer_id: CustomerId, lines: Vec<OrderLine>) -> Self {
        Self {
            id,
            customer_id,
            lines,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_owned_by(&self, customer_id: CustomerId) -> bool {
        self.customer_id == customer_id
    }

    /// Sum of all line totals, recomputed on every call.
    ///
    /// Fails only when the sum leaves the decimal range.
    pub fn total_price(&self) -> DomainResult<Price> {
        Price::checked_sum(self.lines.iter().map(OrderLine::total_price))
    }

    /// Derived view keeping only the lines shipping on `date`.
    ///
    /// Same id and customer; may end up with no lines at all.
    pub fn shippable_on(&self, date: NaiveDate) -> Order {
        Self {
            id: self.id,
            customer_id: self.customer_id,
            lines: self
                .lines
                .iter()
                .filter(|line| line.ships_on(date))
                .cloned()
                .collect(),
        }
    }

    /// One decrement request per line, in line order.
    ///
    /// Lines for the same item are not merged.
    pub fn stock_decrements(&self, occurred_at: DateTime<Utc>) -> Vec<StockDecrementRequested> {
        self.lines
            .iter()
            .map(|line| StockDecrementRequested {
                order_id: self.id,
                item_id: line.item_id(),
                ordered_amount: line.ordered_amount(),
                occurred_at,
            })
            .collect()
    }

    pub fn placed(
        &self,
        reorder_of: Option<OrderId>,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<OrderPlaced> {
        Ok(OrderPlaced {
            order_id: self.id,
            customer_id: self.customer_id,
            line_count: self.lines.len(),
            total_price: self.total_price()?,
            reorder_of,
            occurred_at,
        })
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Event: StockDecrementRequested (one per placed line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDecrementRequested {
    pub order_id: OrderId,
    pub item_id: ItemId,
    pub ordered_amount: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderPlaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub line_count: usize,
    pub total_price: Price,
    /// Source order when this order was created by a reorder.
    pub reorder_of: Option<OrderId>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesEvent {
    OrderPlaced(OrderPlaced),
    StockDecrementRequested(StockDecrementRequested),
}

impl Event for SalesEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SalesEvent::OrderPlaced(_) => "sales.order.placed",
            SalesEvent::StockDecrementRequested(_) => "sales.order_line.stock_decrement_requested",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SalesEvent::OrderPlaced(e) => e.occurred_at,
            SalesEvent::StockDecrementRequested(e) => e.occurred_at,
        }
    }
}
