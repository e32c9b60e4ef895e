//! Application services: the operations exposed to an outer API layer.

pub mod customers;
pub mod error;
pub mod items;
pub mod orders;

pub use customers::CustomerService;
pub use error::{ServiceError, ServiceResult};
pub use items::{ItemService, StockOverviewEntry};
pub use orders::{CustomerOrdersReport, OrderService, OrderSummary};

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use orderdesk_core::{Clock, SystemClock};
use orderdesk_events::{Event, EventBus, EventEnvelope, InMemoryEventBus};

use crate::config::OrderdeskConfig;
use crate::store::InMemoryStore;

pub type JsonEventBus = InMemoryEventBus<EventEnvelope<JsonValue>>;

/// Fully wired in-memory services sharing one store and one bus (dev/test).
pub struct AppServices {
    pub store: Arc<InMemoryStore>,
    pub bus: Arc<JsonEventBus>,
    pub customers: CustomerService<Arc<InMemoryStore>>,
    pub items: ItemService<Arc<InMemoryStore>, Arc<JsonEventBus>>,
    pub orders: OrderService<Arc<InMemoryStore>, Arc<JsonEventBus>>,
}

impl AppServices {
    pub fn in_memory(config: OrderdeskConfig) -> Self {
        Self::in_memory_with_clock(config, Arc::new(SystemClock))
    }

    pub fn in_memory_with_clock(config: OrderdeskConfig, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let bus = Arc::new(JsonEventBus::new());

        Self {
            customers: CustomerService::new(store.clone()),
            items: ItemService::new(store.clone(), bus.clone(), config.stock_thresholds),
            orders: OrderService::new(store.clone(), bus.clone(), clock, config.shipping),
            store,
            bus,
        }
    }
}

/// Publish committed events. Failures are logged, never returned: the work
/// they describe is already durable.
pub(crate) fn publish<B, E>(bus: &B, aggregate_type: &str, events: &[(Uuid, E)])
where
    B: EventBus<EventEnvelope<JsonValue>>,
    E: Event + Serialize,
{
    for (aggregate_id, event) in events {
        let envelope = match EventEnvelope::from_event(aggregate_type, *aggregate_id, event) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(event_type = event.event_type(), error = %err, "failed to serialise event");
                continue;
            }
        };

        if let Err(err) = bus.publish(envelope) {
            tracing::warn!(event_type = event.event_type(), error = ?err, "failed to publish event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::Price;
    use orderdesk_inventory::NewItem;
    use orderdesk_parties::{Address, Email, NewCustomer, PhoneNumber};
    use orderdesk_sales::{NewOrder, RequestedLine};

    use crate::store::{OrderRepository, Store};

    #[test]
    fn wired_services_share_one_store() {
        let services = AppServices::in_memory(OrderdeskConfig::default());

        let customer = services
            .customers
            .create_customer(NewCustomer {
                first_name: "Linus".to_string(),
                last_name: "Pauling".to_string(),
                email: Email::parse("linus@caltech.edu").unwrap(),
                address: Address {
                    street_name: "California Blvd".to_string(),
                    house_number: "1200".to_string(),
                    postal_code: "91125".to_string(),
                    country: "USA".to_string(),
                },
                phone_number: PhoneNumber {
                    number: "626 395 6811".to_string(),
                    country_calling_code: "+1".to_string(),
                },
            })
            .unwrap();
        let item = services
            .items
            .create_item(NewItem {
                name: "Beaker".to_string(),
                description: String::new(),
                price: Price::zero(),
                amount_of_stock: 3,
            })
            .unwrap();

        services
            .orders
            .create_order(NewOrder {
                customer_id: customer.id_typed(),
                lines: vec![RequestedLine {
                    item_id: item.id_typed(),
                    quantity: 2,
                }],
            })
            .unwrap();

        assert_eq!(services.items.get_item(item.id_typed()).unwrap().amount_of_stock(), 1);
        assert_eq!(services.store.read(|tx| tx.find_all_orders().len()).unwrap(), 1);
    }
}
