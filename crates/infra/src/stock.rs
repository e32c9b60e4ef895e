//! Stock bookkeeping driven by order placement.
//!
//! Placing an order raises one [`StockDecrementRequested`] per line. A
//! [`StockDecrementListener`] turns each request into an actual stock change,
//! inside the same transaction that persists the order.

use orderdesk_core::{DomainError, DomainResult, EntityKind};
use orderdesk_inventory::StockDecremented;
use orderdesk_sales::StockDecrementRequested;

use crate::store::ItemRepository;

/// Applies stock-decrement notifications.
pub trait StockDecrementListener: Send + Sync {
    fn on_stock_decrement_requested(
        &self,
        items: &mut dyn ItemRepository,
        request: &StockDecrementRequested,
    ) -> DomainResult<StockDecremented>;
}

/// Default listener: decrements the referenced item and saves it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ItemStockUpdater;

impl StockDecrementListener for ItemStockUpdater {
    fn on_stock_decrement_requested(
        &self,
        items: &mut dyn ItemRepository,
        request: &StockDecrementRequested,
    ) -> DomainResult<StockDecremented> {
        let mut item = items.get_item(request.item_id).ok_or_else(|| {
            DomainError::not_found(
                "decrementing stock for an ordered item",
                EntityKind::Item,
                request.item_id,
            )
        })?;

        let fact = item.decrement_stock(request.ordered_amount, request.occurred_at);
        items.save_item(item);

        if fact.backordered() > 0 {
            tracing::info!(
                item_id = %fact.item_id,
                order_id = %request.order_id,
                backordered = fact.backordered(),
                "stock exhausted; remaining units backordered"
            );
        }

        Ok(fact)
    }
}
