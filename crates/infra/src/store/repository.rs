use orderdesk_core::{CustomerId, ItemId, OrderId};
use orderdesk_inventory::Item;
use orderdesk_parties::Customer;
use orderdesk_sales::Order;

/// Customer store: resolves customer identity.
pub trait CustomerRepository {
    fn customer_exists(&self, id: CustomerId) -> bool;
    fn get_customer(&self, id: CustomerId) -> Option<Customer>;
    fn save_customer(&mut self, customer: Customer) -> Customer;
    fn find_all_customers(&self) -> Vec<Customer>;
}

/// Item store: catalog entries and their stock.
pub trait ItemRepository {
    fn item_exists(&self, id: ItemId) -> bool;
    fn get_item(&self, id: ItemId) -> Option<Item>;
    /// Insert or replace (e.g. after a stock decrement).
    fn save_item(&mut self, item: Item) -> Item;
    fn find_all_items(&self) -> Vec<Item>;
}

/// Order store.
pub trait OrderRepository {
    /// Insert or replace by order id.
    fn save_order(&mut self, order: Order) -> Order;
    fn get_order(&self, id: OrderId) -> Option<Order>;
    fn find_all_orders(&self) -> Vec<Order>;
    fn find_all_orders_by_customer(&self, customer_id: CustomerId) -> Vec<Order>;
}

/// Everything a single transaction can see and change.
pub trait UnitOfWork: CustomerRepository + ItemRepository + OrderRepository {}

impl<T> UnitOfWork for T where T: CustomerRepository + ItemRepository + OrderRepository {}
