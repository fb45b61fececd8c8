//! # Order Types
//!
//! Past orders are carts viewed read-only with their products resolved.

use crate::cart::{Cart, CartItem};
use crate::product::{Currency, Price, Product};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A past order ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: u64,
    pub date: String,
    pub lines: Vec<CartItem>,
    /// Sum over the resolved lines
    pub total: Price,
}

impl OrderSummary {
    /// Resolve a cart against fetched products. Lines whose product is missing are skipped.
    pub fn from_cart(cart: &Cart, products: &HashMap<u64, Product>, currency: Currency) -> Self {
        let lines: Vec<CartItem> = cart
            .products
            .iter()
            .filter_map(|line| {
                products
                    .get(&line.product_id)
                    .map(|product| CartItem::new(product.clone(), line.quantity))
            })
            .collect();

        let amount = lines
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.line_total(currency).amount));

        Self {
            id: cart.id,
            date: cart.date.clone(),
            lines,
            total: Price::from_cents(amount, currency),
        }
    }

    /// Calendar date part of the order timestamp
    pub fn day(&self) -> &str {
        self.date.split('T').next().unwrap_or(&self.date)
    }

    /// Number of units in the order
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}
