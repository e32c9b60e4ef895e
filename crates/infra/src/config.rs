//! Configuration loading and representation.
//!
//! Values come from environment variables; anything missing or unparsable
//! falls back to its default (with a warning for the unparsable case).

use core::fmt::Display;
use core::str::FromStr;

use orderdesk_inventory::StockThresholds;
use orderdesk_sales::ShippingPolicy;

pub const RESTOCK_LEAD_DAYS: &str = "ORDERDESK_RESTOCK_LEAD_DAYS";
pub const BACKORDER_BATCH_SIZE: &str = "ORDERDESK_BACKORDER_BATCH_SIZE";
pub const EXTRA_DAYS_PER_BATCH: &str = "ORDERDESK_EXTRA_DAYS_PER_BATCH";
pub const LOW_STOCK_THRESHOLD: &str = "ORDERDESK_LOW_STOCK_THRESHOLD";
pub const MEDIUM_STOCK_THRESHOLD: &str = "ORDERDESK_MEDIUM_STOCK_THRESHOLD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderdeskConfig {
    pub shipping: ShippingPolicy,
    pub stock_thresholds: StockThresholds,
}

impl OrderdeskConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source (the environment, a test map, ...).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let shipping = ShippingPolicy {
            restock_lead_days: parse_or(
                &lookup,
                RESTOCK_LEAD_DAYS,
                defaults.shipping.restock_lead_days,
            ),
            backorder_batch_size: parse_or(
                &lookup,
                BACKORDER_BATCH_SIZE,
                defaults.shipping.backorder_batch_size,
            ),
            extra_days_per_batch: parse_or(
                &lookup,
                EXTRA_DAYS_PER_BATCH,
                defaults.shipping.extra_days_per_batch,
            ),
        };

        let mut stock_thresholds = StockThresholds {
            low_below: parse_or(&lookup, LOW_STOCK_THRESHOLD, defaults.stock_thresholds.low_below),
            medium_below: parse_or(
                &lookup,
                MEDIUM_STOCK_THRESHOLD,
                defaults.stock_thresholds.medium_below,
            ),
        };
        if stock_thresholds.medium_below < stock_thresholds.low_below {
            tracing::warn!(
                low = stock_thresholds.low_below,
                medium = stock_thresholds.medium_below,
                "medium stock threshold below low threshold; raising it"
            );
            stock_thresholds.medium_below = stock_thresholds.low_below;
        }

        Self {
            shipping,
            stock_thresholds,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "invalid configuration value; using default");
            default
        }),
    }
}
