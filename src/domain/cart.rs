//! Shopping cart submitted with each request. Never persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub price: Decimal,
}

impl CartItem {
    pub fn new(id: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            price,
        }
    }
}

/// Cart contents in submission order.
///
/// `total` is taken as given and never recomputed from the items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub total: Decimal,
}

impl Cart {
    pub fn new(items: Vec<CartItem>, total: Decimal) -> Self {
        Self { items, total }
    }

    /// Iterates over the item identifiers.
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }
}
