//! Shipping-date derivation from available stock.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Maps a stock shortage to a shipping date.
///
/// Orders that stock can cover ship today. Otherwise the date moves out by
/// `restock_lead_days`, plus `extra_days_per_batch` for every further
/// `backorder_batch_size` units missing. The mapping is monotonic: a larger
/// shortage never ships earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    pub restock_lead_days: u32,
    pub backorder_batch_size: u32,
    pub extra_days_per_batch: u32,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            restock_lead_days: 7,
            backorder_batch_size: 100,
            extra_days_per_batch: 7,
        }
    }
}

impl ShippingPolicy {
    pub fn shipping_date(&self, today: NaiveDate, available_stock: u32, ordered_amount: u32) -> NaiveDate {
        if ordered_amount <= available_stock {
            return today;
        }

        let shortage = ordered_amount - available_stock;
        // Shortages of 1..=batch units need no extra batch.
        let extra_batches = (shortage - 1) / self.backorder_batch_size.max(1);
        // A lead time of zero would ship a shortage today; one day is the floor.
        let days = u64::from(self.restock_lead_days.max(1))
            + u64::from(extra_batches) * u64::from(self.extra_days_per_batch);

        today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
    }
}
