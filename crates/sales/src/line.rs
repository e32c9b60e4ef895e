use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use orderdesk_core::{DomainError, DomainResult, ItemId, Price};
use orderdesk_inventory::Item;

use crate::shipping::ShippingPolicy;

/// One ordered quantity of one item.
///
/// The unit price, the line total and the shipping date are frozen when the
/// line is built; later changes to the item never reach an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    item_id: ItemId,
    ordered_amount: u32,
    item_price: Price,
    total_price: Price,
    shipping_date: NaiveDate,
}

impl OrderLine {
    /// Build a line from the item as it is right now.
    pub fn for_item(
        item: &Item,
        ordered_amount: u32,
        today: NaiveDate,
        policy: &ShippingPolicy,
    ) -> DomainResult<Self> {
        Self::against_stock(item, item.amount_of_stock(), ordered_amount, today, policy)
    }

    fn against_stock(
        item: &Item,
        available_stock: u32,
        ordered_amount: u32,
        today: NaiveDate,
        policy: &ShippingPolicy,
    ) -> DomainResult<Self> {
        Self::from_parts(
            item.id_typed(),
            ordered_amount,
            item.price(),
            policy.shipping_date(today, available_stock, ordered_amount),
        )
    }

    /// Rebuild a line from previously stored values.
    ///
    /// Fails when the quantity is zero or the line total is out of range.
    pub fn from_parts(
        item_id: ItemId,
        ordered_amount: u32,
        item_price: Price,
        shipping_date: NaiveDate,
    ) -> DomainResult<Self> {
        if ordered_amount == 0 {
            return Err(DomainError::validation("ordered amount must be positive"));
        }

        Ok(Self {
            item_id,
            ordered_amount,
            item_price,
            total_price: item_price.times(ordered_amount)?,
            shipping_date,
        })
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn ordered_amount(&self) -> u32 {
        self.ordered_amount
    }

    pub fn item_price(&self) -> Price {
        self.item_price
    }

    pub fn shipping_date(&self) -> NaiveDate {
        self.shipping_date
    }

    pub fn ships_on(&self, date: NaiveDate) -> bool {
        self.shipping_date == date
    }

    pub fn total_price(&self) -> Price {
        self.total_price
    }
}

/// Builds the lines of one order.
///
/// Each line is scheduled against the stock the earlier lines of the same
/// order left for its item, so two lines never both claim the same units.
#[derive(Debug)]
pub struct OrderLinePlanner<'a> {
    today: NaiveDate,
    policy: &'a ShippingPolicy,
    claimed: BTreeMap<ItemId, u32>,
}

impl<'a> OrderLinePlanner<'a> {
    pub fn new(today: NaiveDate, policy: &'a ShippingPolicy) -> Self {
        Self {
            today,
            policy,
            claimed: BTreeMap::new(),
        }
    }

    pub fn plan(&mut self, item: &Item, ordered_amount: u32) -> DomainResult<OrderLine> {
        let claimed = self.claimed.entry(item.id_typed()).or_insert(0);
        let available = item.amount_of_stock().saturating_sub(*claimed);

        let line = OrderLine::against_stock(item, available, ordered_amount, self.today, self.policy)?;
        *claimed = claimed.saturating_add(ordered_amount);
        Ok(line)
    }
}
