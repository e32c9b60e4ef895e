//! Catalog/inventory domain module.
//!
//! Items carry the current price and the amount in stock. Stock only moves
//! through [`Item::decrement_stock`], which never lets it go below zero.

pub mod item;

pub use item::{
    InventoryEvent, Item, ItemUpdate, NewItem, StockDecremented, StockThresholds, StockUrgency,
};
