use chrono::Utc;
use serde::Serialize;
use serde_json::Value as JsonValue;

use orderdesk_core::{DomainError, EntityKind, ItemId};
use orderdesk_events::{EventBus, EventEnvelope};
use orderdesk_inventory::{
    InventoryEvent, Item, ItemUpdate, NewItem, StockDecremented, StockThresholds, StockUrgency,
};

use crate::services::error::ServiceResult;
use crate::services::publish;
use crate::store::{ItemRepository, Store};

/// One row of the stock overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockOverviewEntry {
    pub urgency: StockUrgency,
    pub item: Item,
}

/// Catalog maintenance and stock lookup.
#[derive(Debug)]
pub struct ItemService<S, B> {
    store: S,
    bus: B,
    thresholds: StockThresholds,
}

impl<S, B> ItemService<S, B> {
    pub fn new(store: S, bus: B, thresholds: StockThresholds) -> Self {
        Self {
            store,
            bus,
            thresholds,
        }
    }
}

impl<S, B> ItemService<S, B>
where
    S: Store,
    B: EventBus<EventEnvelope<JsonValue>>,
{
    #[tracing::instrument(skip_all)]
    pub fn create_item(&self, params: NewItem) -> ServiceResult<Item> {
        let item = Item::new(params).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected item creation");
        })?;

        let saved = self
            .store
            .transaction(|tx| -> ServiceResult<Item> { Ok(tx.save_item(item)) })?;

        tracing::info!(item_id = %saved.id_typed(), stock = saved.amount_of_stock(), "item created");
        Ok(saved)
    }

    #[tracing::instrument(skip_all, fields(item_id = %id))]
    pub fn update_item(&self, id: ItemId, update: ItemUpdate) -> ServiceResult<Item> {
        self.store.transaction(|tx| -> ServiceResult<Item> {
            let mut item = tx
                .get_item(id)
                .ok_or_else(|| DomainError::not_found("updating an item", EntityKind::Item, id))?;
            item.update(update)?;
            Ok(tx.save_item(item))
        })
    }

    pub fn get_item(&self, id: ItemId) -> ServiceResult<Item> {
        let item = self.store.read(|tx| tx.get_item(id))?;
        item.ok_or_else(|| DomainError::not_found("retrieving an item", EntityKind::Item, id).into())
    }

    pub fn get_all_items(&self) -> ServiceResult<Vec<Item>> {
        Ok(self.store.read(|tx| tx.find_all_items())?)
    }

    /// Manual stock correction outside of order placement.
    #[tracing::instrument(skip(self, id), fields(item_id = %id))]
    pub fn decrement_stock_for_item(&self, id: ItemId, amount: u32) -> ServiceResult<StockDecremented> {
        let fact = self.store.transaction(|tx| -> ServiceResult<StockDecremented> {
            let mut item = tx.get_item(id).ok_or_else(|| {
                DomainError::not_found("decrementing the stock of an item", EntityKind::Item, id)
            })?;
            let fact = item.decrement_stock(amount, Utc::now());
            tx.save_item(item);
            Ok(fact)
        })?;

        publish(
            &self.bus,
            "inventory.item",
            &[(*id.as_uuid(), InventoryEvent::StockDecremented(fact.clone()))],
        );
        Ok(fact)
    }

    /// All items, most urgent restock first; ties broken by lowest stock.
    pub fn get_items_by_urgency(&self) -> ServiceResult<Vec<StockOverviewEntry>> {
        let mut entries: Vec<StockOverviewEntry> = self
            .get_all_items()?
            .into_iter()
            .map(|item| StockOverviewEntry {
                urgency: item.urgency(&self.thresholds),
                item,
            })
            .collect();

        entries.sort_by_key(|entry| (entry.urgency, entry.item.amount_of_stock()));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use orderdesk_core::Price;
    use orderdesk_events::InMemoryEventBus;
    use rust_decimal_macros::dec;

    use crate::services::ServiceError;
    use crate::store::InMemoryStore;

    type TestService = ItemService<InMemoryStore, Arc<InMemoryEventBus<EventEnvelope<JsonValue>>>>;

    fn service() -> (TestService, Arc<InMemoryEventBus<EventEnvelope<JsonValue>>>) {
        let bus = Arc::new(InMemoryEventBus::new());
        let service = ItemService::new(InMemoryStore::new(), bus.clone(), StockThresholds::default());
        (service, bus)
    }

    fn new_item(name: &str, stock: u32) -> NewItem {
        NewItem {
            name: name.to_string(),
            description: format!("{name} description"),
            price: Price::new(dec!(3.50)),
            amount_of_stock: stock,
        }
    }

    #[test]
    fn create_then_get() {
        let (service, _) = service();
        let item = service.create_item(new_item("Pen", 40)).unwrap();

        assert_eq!(service.get_item(item.id_typed()).unwrap(), item);
        assert_eq!(service.get_all_items().unwrap().len(), 1);
    }

    #[test]
    fn update_of_unknown_item_is_not_found() {
        let (service, _) = service();
        let err = service
            .update_item(
                ItemId::new(),
                ItemUpdate {
                    name: "Pen".to_string(),
                    description: String::new(),
                    price: Price::zero(),
                    amount_of_stock: 1,
                },
            )
            .unwrap_err();
        assert!(err.as_domain().is_some_and(DomainError::is_not_found));
    }

    #[test]
    fn invalid_update_keeps_stored_item() {
        let (service, _) = service();
        let item = service.create_item(new_item("Pen", 40)).unwrap();

        let err = service
            .update_item(
                item.id_typed(),
                ItemUpdate {
                    name: String::new(),
                    description: String::new(),
                    price: Price::zero(),
                    amount_of_stock: 1,
                },
            )
            .unwrap_err();

        assert!(matches!(err, ServiceError::Domain(DomainError::InvalidEntity { .. })));
        assert_eq!(service.get_item(item.id_typed()).unwrap(), item);
    }

    #[test]
    fn manual_decrement_persists_and_publishes() {
        let (service, bus) = service();
        let sub = bus.subscribe();
        let item = service.create_item(new_item("Pen", 10)).unwrap();

        let fact = service.decrement_stock_for_item(item.id_typed(), 4).unwrap();

        assert_eq!(fact.remaining_stock, 6);
        assert_eq!(service.get_item(item.id_typed()).unwrap().amount_of_stock(), 6);
        let published = sub.drain();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].event_type(), "inventory.item.stock_decremented");
        assert_eq!(published[0].aggregate_id(), *item.id_typed().as_uuid());
    }

    #[test]
    fn stock_overview_puts_most_urgent_first() {
        let (service, _) = service();
        service.create_item(new_item("Plenty", 50)).unwrap();
        service.create_item(new_item("Some", 7)).unwrap();
        service.create_item(new_item("Almost gone", 1)).unwrap();
        service.create_item(new_item("Few", 3)).unwrap();

        let overview = service.get_items_by_urgency().unwrap();
        let names: Vec<&str> = overview.iter().map(|e| e.item.name()).collect();

        assert_eq!(names, vec!["Almost gone", "Few", "Some", "Plenty"]);
        assert_eq!(overview[0].urgency, StockUrgency::Low);
        assert_eq!(overview[2].urgency, StockUrgency::Medium);
        assert_eq!(overview[3].urgency, StockUrgency::High);
    }
}
