use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;

use orderdesk_core::{Clock, CustomerId, DomainError, DomainResult, EntityKind, OrderId, Price};
use orderdesk_events::{EventBus, EventEnvelope};
use orderdesk_inventory::{InventoryEvent, StockDecremented};
use orderdesk_sales::{
    NewOrder, Order, OrderLine, OrderLinePlanner, OrderPlaced, OrderValidator, SalesEvent,
    ShippingPolicy, StockDecrementRequested,
};

use crate::services::error::ServiceResult;
use crate::services::publish;
use crate::stock::{ItemStockUpdater, StockDecrementListener};
use crate::store::{CustomerRepository, ItemRepository, OrderRepository, Store, UnitOfWork};

/// One order in a [`CustomerOrdersReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub lines: Vec<OrderLine>,
    pub total_price: Price,
}

/// All orders of one customer, with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerOrdersReport {
    pub customer_id: CustomerId,
    pub orders: Vec<OrderSummary>,
    pub total_price_of_all_orders: Price,
}

/// Everything a committed placement has to announce.
struct Placement {
    order: Order,
    placed: OrderPlaced,
    requested: Vec<StockDecrementRequested>,
    decremented: Vec<StockDecremented>,
}

/// Order lifecycle: placement, listing, reorder.
///
/// Every placement runs in one store transaction: existence checks, line
/// construction against current stock, stock decrements and persistence
/// either all happen or none do. Events go out on the bus after commit.
pub struct OrderService<S, B> {
    store: S,
    bus: B,
    clock: Arc<dyn Clock>,
    policy: ShippingPolicy,
    validator: OrderValidator,
    stock_listener: Arc<dyn StockDecrementListener>,
}

impl<S, B> OrderService<S, B> {
    pub fn new(store: S, bus: B, clock: Arc<dyn Clock>, policy: ShippingPolicy) -> Self {
        Self {
            store,
            bus,
            clock,
            policy,
            validator: OrderValidator,
            stock_listener: Arc::new(ItemStockUpdater),
        }
    }

    pub fn with_stock_listener(mut self, listener: Arc<dyn StockDecrementListener>) -> Self {
        self.stock_listener = listener;
        self
    }
}

impl<S, B> OrderService<S, B>
where
    S: Store,
    B: EventBus<EventEnvelope<JsonValue>>,
{
    #[tracing::instrument(skip_all, fields(customer_id = %request.customer_id, lines = request.lines.len()))]
    pub fn create_order(&self, request: NewOrder) -> ServiceResult<Order> {
        self.validator
            .validate_for_creation(&request)
            .inspect_err(|err| tracing::warn!(error = %err, "rejected order"))?;

        let today = self.clock.today();
        let now = Utc::now();

        let placement = self
            .store
            .transaction(|tx| -> ServiceResult<Placement> {
                if !tx.customer_exists(request.customer_id) {
                    return Err(DomainError::not_found(
                        "creation of a new order when checking if the referenced customer exists",
                        EntityKind::Customer,
                        request.customer_id,
                    )
                    .into());
                }

                if !request.lines.iter().all(|line| tx.item_exists(line.item_id)) {
                    return Err(DomainError::invalid_entity(
                        "creation of a new order when checking if all the ordered items exist",
                        &request,
                    )
                    .into());
                }

                let mut planner = OrderLinePlanner::new(today, &self.policy);
                let lines = request
                    .lines
                    .iter()
                    .map(|requested| {
                        let item = tx.get_item(requested.item_id).ok_or_else(|| {
                            DomainError::not_found(
                                "creation of a new order",
                                EntityKind::Item,
                                requested.item_id,
                            )
                        })?;
                        planner.plan(&item, requested.quantity)
                    })
                    .collect::<DomainResult<Vec<_>>>()?;

                self.place(tx, Order::new(request.customer_id, lines), None, now)
            })
            .inspect_err(|err| tracing::warn!(error = %err, "order placement rolled back"))?;

        Ok(self.announce(placement))
    }

    /// All orders; with `only_shippable_today` each order keeps only the
    /// lines shipping today. Orders left without lines are still returned.
    pub fn get_all_orders(&self, only_shippable_today: bool) -> ServiceResult<Vec<Order>> {
        let orders = self.store.read(|tx| tx.find_all_orders())?;
        if !only_shippable_today {
            return Ok(orders);
        }

        let today = self.clock.today();
        Ok(orders.iter().map(|order| order.shippable_on(today)).collect())
    }

    pub fn get_orders_for_customer(&self, customer_id: CustomerId) -> ServiceResult<Vec<Order>> {
        let orders = self.store.read(|tx| {
            tx.customer_exists(customer_id)
                .then(|| tx.find_all_orders_by_customer(customer_id))
        })?;

        orders.ok_or_else(|| {
            DomainError::not_found(
                "retrieving the orders of a customer",
                EntityKind::Customer,
                customer_id,
            )
            .into()
        })
    }

    /// Place a new order with the same items and quantities as an earlier
    /// one, priced and scheduled from the items as they are now.
    #[tracing::instrument(skip(self))]
    pub fn reorder_order(&self, order_id: OrderId, requester: CustomerId) -> ServiceResult<Order> {
        let today = self.clock.today();
        let now = Utc::now();

        let placement = self
            .store
            .transaction(|tx| -> ServiceResult<Placement> {
                let original = tx.get_order(order_id).ok_or_else(|| {
                    DomainError::not_found("reordering an order", EntityKind::Order, order_id)
                })?;

                if !original.is_owned_by(requester) || !tx.customer_exists(requester) {
                    return Err(DomainError::not_authorized(format!(
                        "Customer {requester} is not allowed to reorder the Order {order_id} because they are not the owner of that order"
                    ))
                    .into());
                }

                let mut planner = OrderLinePlanner::new(today, &self.policy);
                let lines = original
                    .lines()
                    .iter()
                    .map(|line| {
                        let item = tx.get_item(line.item_id()).ok_or_else(|| {
                            DomainError::not_found(
                                "reordering an order",
                                EntityKind::Item,
                                line.item_id(),
                            )
                        })?;
                        planner.plan(&item, line.ordered_amount())
                    })
                    .collect::<DomainResult<Vec<_>>>()?;

                self.place(tx, Order::new(original.customer_id(), lines), Some(order_id), now)
            })
            .inspect_err(|err| tracing::warn!(error = %err, "reorder rejected"))?;

        Ok(self.announce(placement))
    }

    pub fn orders_report_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> ServiceResult<CustomerOrdersReport> {
        let orders = self
            .get_orders_for_customer(customer_id)?
            .into_iter()
            .map(|order| {
                Ok(OrderSummary {
                    order_id: order.id_typed(),
                    total_price: order.total_price()?,
                    lines: order.lines().to_vec(),
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        let total_price_of_all_orders =
            Price::checked_sum(orders.iter().map(|summary| summary.total_price))?;

        Ok(CustomerOrdersReport {
            customer_id,
            orders,
            total_price_of_all_orders,
        })
    }

    /// Decrement stock once per line, in line order, then persist.
    fn place<T: UnitOfWork>(
        &self,
        tx: &mut T,
        order: Order,
        reorder_of: Option<OrderId>,
        now: DateTime<Utc>,
    ) -> ServiceResult<Placement> {
        let placed = order.placed(reorder_of, now)?;
        let requested = order.stock_decrements(now);
        let mut decremented = Vec::with_capacity(requested.len());
        for request in &requested {
            decremented.push(
                self.stock_listener
                    .on_stock_decrement_requested(&mut *tx, request)?,
            );
        }

        let order = tx.save_order(order);

        Ok(Placement {
            order,
            placed,
            requested,
            decremented,
        })
    }

    fn announce(&self, placement: Placement) -> Order {
        let Placement {
            order,
            placed,
            requested,
            decremented,
        } = placement;

        tracing::info!(
            order_id = %order.id_typed(),
            customer_id = %order.customer_id(),
            total_price = %placed.total_price,
            reorder_of = ?placed.reorder_of,
            "order placed"
        );

        let order_uuid = *order.id_typed().as_uuid();
        let sales_events: Vec<_> = std::iter::once(SalesEvent::OrderPlaced(placed))
            .chain(requested.into_iter().map(SalesEvent::StockDecrementRequested))
            .map(|event| (order_uuid, event))
            .collect();
        publish(&self.bus, "sales.order", &sales_events);

        let inventory_events: Vec<_> = decremented
            .into_iter()
            .map(|fact| (*fact.item_id.as_uuid(), InventoryEvent::StockDecremented(fact)))
            .collect();
        publish(&self.bus, "inventory.item", &inventory_events);

        order
    }
}
