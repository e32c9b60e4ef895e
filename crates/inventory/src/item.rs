use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderdesk_core::{DomainError, DomainResult, Entity, ItemId, Price};
use orderdesk_events::Event;

/// Parameters for a new catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub amount_of_stock: u32,
}

/// Full replacement of an item's mutable attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub amount_of_stock: u32,
}

/// Catalog item: current price + stock on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    description: String,
    price: Price,
    amount_of_stock: u32,
}

impl Item {
    /// Validate and build a new item with a freshly generated id.
    pub fn new(params: NewItem) -> DomainResult<Self> {
        Self::with_id(ItemId::new(), params)
    }

    /// Validate and build an item with a caller-chosen id.
    pub fn with_id(id: ItemId, params: NewItem) -> DomainResult<Self> {
        let item = Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            amount_of_stock: params.amount_of_stock,
        };
        item.ensure_valid("creation of a new item")?;
        Ok(item)
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn amount_of_stock(&self) -> u32 {
        self.amount_of_stock
    }

    /// Replace name, description, price and stock. The id never changes.
    pub fn update(&mut self, update: ItemUpdate) -> DomainResult<()> {
        let mut candidate = self.clone();
        candidate.name = update.name;
        candidate.description = update.description;
        candidate.price = update.price;
        candidate.amount_of_stock = update.amount_of_stock;
        candidate.ensure_valid("updating an item")?;
        *self = candidate;
        Ok(())
    }

    /// Take `amount` units out of stock, saturating at zero.
    ///
    /// Units that cannot be covered by stock are backordered; they are reported
    /// in the returned fact but never turn into negative stock.
    pub fn decrement_stock(&mut self, amount: u32, occurred_at: DateTime<Utc>) -> StockDecremented {
        let applied = amount.min(self.amount_of_stock);
        self.amount_of_stock -= applied;

        StockDecremented {
            item_id: self.id,
            requested: amount,
            applied,
            remaining_stock: self.amount_of_stock,
            occurred_at,
        }
    }

    pub fn urgency(&self, thresholds: &StockThresholds) -> StockUrgency {
        thresholds.classify(self.amount_of_stock)
    }

    fn ensure_valid(&self, context: &str) -> DomainResult<()> {
        if self.name.trim().is_empty() || self.price.is_negative() {
            return Err(DomainError::invalid_entity(context, self));
        }
        Ok(())
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// How urgently an item needs restocking.
///
/// Ordered most urgent first, so sorting by urgency puts `Low` on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockUrgency {
    Low,
    Medium,
    High,
}

/// Stock levels separating the urgency buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockThresholds {
    /// Stock strictly below this is `Low`.
    pub low_below: u32,
    /// Stock strictly below this (and not `Low`) is `Medium`.
    pub medium_below: u32,
}

impl Default for StockThresholds {
    fn default() -> Self {
        Self {
            low_below: 5,
            medium_below: 10,
        }
    }
}

impl StockThresholds {
    pub fn classify(&self, amount_of_stock: u32) -> StockUrgency {
        if amount_of_stock < self.low_below {
            StockUrgency::Low
        } else if amount_of_stock < self.medium_below {
            StockUrgency::Medium
        } else {
            StockUrgency::High
        }
    }
}

/// Event: StockDecremented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDecremented {
    pub item_id: ItemId,
    pub requested: u32,
    pub applied: u32,
    pub remaining_stock: u32,
    pub occurred_at: DateTime<Utc>,
}

impl StockDecremented {
    /// Units that could not be served from stock.
    pub fn backordered(&self) -> u32 {
        self.requested - self.applied
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    StockDecremented(StockDecremented),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::StockDecremented(_) => "inventory.item.stock_decremented",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::StockDecremented(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_item(stock: u32) -> Item {
        Item::new(NewItem {
            name: "Wireless mouse".to_string(),
            description: "2.4GHz, two buttons".to_string(),
            price: Price::new(dec!(19.99)),
            amount_of_stock: stock,
        })
        .unwrap()
    }

    #[test]
    fn new_item_requires_a_name() {
        let err = Item::new(NewItem {
            name: "   ".to_string(),
            description: String::new(),
            price: Price::new(dec!(1)),
            amount_of_stock: 1,
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidEntity { .. }));
    }

    #[test]
    fn new_item_rejects_negative_price() {
        let err = Item::new(NewItem {
            name: "Cable".to_string(),
            description: String::new(),
            price: Price::new(dec!(-0.50)),
            amount_of_stock: 1,
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidEntity { .. }));
    }

    #[test]
    fn decrement_reduces_stock() {
        let mut item = test_item(10);
        let fact = item.decrement_stock(4, Utc::now());

        assert_eq!(item.amount_of_stock(), 6);
        assert_eq!(fact.applied, 4);
        assert_eq!(fact.remaining_stock, 6);
        assert_eq!(fact.backordered(), 0);
    }

    #[test]
    fn decrement_saturates_at_zero() {
        let mut item = test_item(10);
        let fact = item.decrement_stock(15, Utc::now());

        assert_eq!(item.amount_of_stock(), 0);
        assert_eq!(fact.requested, 15);
        assert_eq!(fact.applied, 10);
        assert_eq!(fact.backordered(), 5);
    }

    #[test]
    fn failed_update_leaves_item_untouched() {
        let mut item = test_item(3);
        let before = item.clone();
        let err = item
            .update(ItemUpdate {
                name: String::new(),
                description: "x".to_string(),
                price: Price::new(dec!(5)),
                amount_of_stock: 99,
            })
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidEntity { .. }));
        assert_eq!(item, before);
    }

    #[test]
    fn update_replaces_attributes_but_keeps_id() {
        let mut item = test_item(3);
        let id = item.id_typed();
        item.update(ItemUpdate {
            name: "Mouse v2".to_string(),
            description: "silent clicks".to_string(),
            price: Price::new(dec!(24.50)),
            amount_of_stock: 40,
        })
        .unwrap();

        assert_eq!(item.id_typed(), id);
        assert_eq!(item.name(), "Mouse v2");
        assert_eq!(item.price(), Price::new(dec!(24.5)));
        assert_eq!(item.amount_of_stock(), 40);
    }

    #[test]
    fn urgency_buckets_follow_thresholds() {
        let thresholds = StockThresholds::default();
        assert_eq!(thresholds.classify(0), StockUrgency::Low);
        assert_eq!(thresholds.classify(4), StockUrgency::Low);
        assert_eq!(thresholds.classify(5), StockUrgency::Medium);
        assert_eq!(thresholds.classify(9), StockUrgency::Medium);
        assert_eq!(thresholds.classify(10), StockUrgency::High);
        assert!(StockUrgency::Low < StockUrgency::High);
    }

    mod proptest_tests {
        use super::test_item;
        use chrono::Utc;
        use proptest::prelude::*;

        proptest! {
            /// Property: stock never goes negative and applied + remaining is conserved.
            #[test]
            fn decrement_conserves_units(stock in 0u32..1_000, amounts in proptest::collection::vec(0u32..500, 0..20)) {
                let mut item = test_item(stock);
                let mut applied_total = 0u32;
                for amount in amounts {
                    let fact = item.decrement_stock(amount, Utc::now());
                    prop_assert!(fact.applied <= fact.requested);
                    applied_total += fact.applied;
                }
                prop_assert_eq!(applied_total + item.amount_of_stock(), stock);
            }
        }
    }
}
