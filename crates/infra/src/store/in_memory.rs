use std::collections::BTreeMap;
use std::sync::Mutex;

use orderdesk_core::{CustomerId, Entity, ItemId, OrderId};
use orderdesk_inventory::Item;
use orderdesk_parties::Customer;
use orderdesk_sales::Order;

use super::repository::{CustomerRepository, ItemRepository, OrderRepository};
use super::{Store, StoreError};

/// Plain in-memory contents of the store.
///
/// Keys are UUIDv7 ids, so iteration order follows creation order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryState {
    customers: BTreeMap<CustomerId, Customer>,
    items: BTreeMap<ItemId, Item>,
    orders: BTreeMap<OrderId, Order>,
}

impl CustomerRepository for InMemoryState {
    fn customer_exists(&self, id: CustomerId) -> bool {
        self.customers.contains_key(&id)
    }

    fn get_customer(&self, id: CustomerId) -> Option<Customer> {
        self.customers.get(&id).cloned()
    }

    fn save_customer(&mut self, customer: Customer) -> Customer {
        self.customers.insert(*customer.id(), customer.clone());
        customer
    }

    fn find_all_customers(&self) -> Vec<Customer> {
        self.customers.values().cloned().collect()
    }
}

impl ItemRepository for InMemoryState {
    fn item_exists(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    fn get_item(&self, id: ItemId) -> Option<Item> {
        self.items.get(&id).cloned()
    }

    fn save_item(&mut self, item: Item) -> Item {
        self.items.insert(*item.id(), item.clone());
        item
    }

    fn find_all_items(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }
}

impl OrderRepository for InMemoryState {
    fn save_order(&mut self, order: Order) -> Order {
        self.orders.insert(*order.id(), order.clone());
        order
    }

    fn get_order(&self, id: OrderId) -> Option<Order> {
        self.orders.get(&id).cloned()
    }

    fn find_all_orders(&self) -> Vec<Order> {
        self.orders.values().cloned().collect()
    }

    fn find_all_orders_by_customer(&self, customer_id: CustomerId) -> Vec<Order> {
        self.orders
            .values()
            .filter(|order| order.is_owned_by(customer_id))
            .cloned()
            .collect()
    }
}

/// In-memory transactional store.
///
/// Intended for tests/dev. Transactions are serialised by a single lock and
/// work on a staged copy of the state that replaces the live one on commit.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<InMemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for InMemoryStore {
    type Tx = InMemoryState;

    fn read<T>(&self, f: impl FnOnce(&Self::Tx) -> T) -> Result<T, StoreError> {
        let state = self.state.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&*state))
    }

    fn transaction<T, E>(&self, f: impl FnOnce(&mut Self::Tx) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut live = self.state.lock().map_err(|_| StoreError::Poisoned)?;

        let mut staged = live.clone();
        let out = f(&mut staged)?;
        *live = staged;

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::Price;
    use orderdesk_inventory::NewItem;

    fn test_item(stock: u32) -> Item {
        Item::new(NewItem {
            name: "Stapler".to_string(),
            description: String::new(),
            price: Price::zero(),
            amount_of_stock: stock,
        })
        .unwrap()
    }

    #[derive(Debug)]
    enum TestError {
        Store,
        Domain,
    }

    impl From<StoreError> for TestError {
        fn from(_: StoreError) -> Self {
            TestError::Store
        }
    }

    #[test]
    fn committed_transaction_is_visible() {
        let store = InMemoryStore::new();
        let item = test_item(3);
        let id = item.id_typed();

        store
            .transaction(|tx| -> Result<(), TestError> {
                tx.save_item(item);
                Ok(())
            })
            .unwrap();

        assert!(store.read(|tx| tx.item_exists(id)).unwrap());
    }

    #[test]
    fn failed_transaction_rolls_back_every_change() {
        let store = InMemoryStore::new();
        let item = test_item(10);
        let id = item.id_typed();
        store
            .transaction(|tx| -> Result<(), TestError> {
                tx.save_item(item);
                Ok(())
            })
            .unwrap();

        let result = store.transaction(|tx| -> Result<(), TestError> {
            let mut item = tx.get_item(id).ok_or(TestError::Domain)?;
            item.decrement_stock(4, chrono::Utc::now());
            tx.save_item(item);
            tx.save_item(test_item(1));
            Err(TestError::Domain)
        });

        assert!(matches!(result, Err(TestError::Domain)));
        let (stock, count) = store
            .read(|tx| (tx.get_item(id).map(|i| i.amount_of_stock()), tx.find_all_items().len()))
            .unwrap();
        assert_eq!(stock, Some(10));
        assert_eq!(count, 1);
    }
}
