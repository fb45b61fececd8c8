//! # Cart Types
//!
//! Server-side cart records and the shopper's local view of a cart.
//! Quantity edits on [`LocalCart`] are optimistic and never sent back to the API.

use crate::error::{ShopError, ShopResult};
use crate::product::{Currency, Price, Product};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A product/quantity pair as stored on a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: u64,
    pub quantity: u32,
}

/// A cart record owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: u64,
    pub user_id: u64,
    /// ISO-8601 date or timestamp, as returned by the API
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub products: Vec<CartLine>,
}

impl Cart {
    /// Distinct product IDs on this cart, in line order
    pub fn product_ids(&self) -> Vec<u64> {
        let mut ids = Vec::with_capacity(self.products.len());
        for line in &self.products {
            if !ids.contains(&line.product_id) {
                ids.push(line.product_id);
            }
        }
        ids
    }
}

/// Payload for adding products to a user's cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCart {
    pub user_id: u64,
    /// `YYYY-MM-DD`
    pub date: String,
    pub products: Vec<CartLine>,
}

impl NewCart {
    /// Single-product cart dated `date`
    pub fn single(user_id: u64, product_id: u64, quantity: u32, date: NaiveDate) -> ShopResult<Self> {
        if quantity == 0 {
            return Err(ShopError::InvalidRequest(
                "Quantity must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            user_id,
            date: date.format("%Y-%m-%d").to_string(),
            products: vec![CartLine {
                product_id,
                quantity,
            }],
        })
    }
}

/// A cart line with its product resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Calculate the total price for this line
    pub fn line_total(&self, currency: Currency) -> Price {
        let unit = self.product.unit_price(currency);
        Price::from_cents(unit.amount.saturating_mul(i64::from(self.quantity)), currency)
    }
}

/// The shopper's working copy of a cart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalCart {
    items: Vec<CartItem>,
}

impl LocalCart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Change a line's quantity by `delta`; lines that drop to zero are removed
    pub fn update_quantity(&mut self, product_id: u64, delta: i64) {
        for item in self.items.iter_mut() {
            if item.product.id == product_id {
                let next = i64::from(item.quantity)
                    .saturating_add(delta)
                    .clamp(0, i64::from(u32::MAX));
                item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
            }
        }
        self.items.retain(|item| item.quantity > 0);
    }

    /// Drop a product from the cart entirely
    pub fn remove(&mut self, product_id: u64) {
        self.items.retain(|item| item.product.id != product_id);
    }

    /// Calculate cart total
    pub fn total(&self, currency: Currency) -> Price {
        let amount = self
            .items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.line_total(currency).amount));
        Price::from_cents(amount, currency)
    }

    /// Total number of units across all lines
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
