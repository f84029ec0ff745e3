//! Persisted shopping cart.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::{
    application::ports::key_value_store::{KeyValueStore, read_or_none, write_best_effort},
    domain::entities::{cart_item::CartItem, convert_from_usd},
};

pub const CART_STORAGE_KEY: &str = "data_platform_cart_v1";

/// One cart row re-priced into the display currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub id: String,
    pub name: String,
    pub unit_price: i64,
    pub qty: u32,
    pub line_total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    pub currency: String,
    pub lines: Vec<CartLine>,
    pub subtotal: i64,
}

/// Line items kept in memory and written back to the key-value store after
/// every mutation. Persistence is best effort.
pub struct Cart {
    store: Arc<dyn KeyValueStore>,
    items: Vec<CartItem>,
}

impl Cart {
    /// Load the cart from the store. Missing or malformed data is an empty cart.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let items = read_or_none(store.as_ref(), CART_STORAGE_KEY)
            .map(|raw| parse_items(&raw))
            .unwrap_or_default();

        Self { store, items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item with quantity 1. An item whose id is already in the cart
    /// is ignored.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub fn add(&mut self, mut item: CartItem) {
        if self.contains(&item.id) {
            tracing::debug!("Item already in cart");
            return;
        }
        item.qty = 1;
        self.items.push(item);
        self.persist();
    }

    /// Append an item, or increase the quantity of the existing one by `item.qty`.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub fn upsert(&mut self, item: CartItem) {
        let step = item.qty.max(1);
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => existing.qty = existing.qty.saturating_add(step),
            None => self.items.push(CartItem { qty: step, ..item }),
        }
        self.persist();
    }

    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        if self.items.len() != before {
            self.persist();
        }
    }

    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Set an item's quantity to `floor(qty)`. Values below 1, NaN and
    /// infinities are ignored.
    #[instrument(skip(self))]
    pub fn set_qty(&mut self, id: &str, qty: f64) {
        if !qty.is_finite() || qty < 1.0 {
            return;
        }
        let qty = qty.floor().min(f64::from(u32::MAX)) as u32;

        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.qty = qty;
            self.persist();
        }
    }

    /// Sum of quantities.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.qty)).sum()
    }

    /// Sum of stored unit price times quantity. Items are summed as-is even
    /// when their currencies differ.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// The cart re-priced into `currency` from each item's feature-adjusted price.
    pub fn view(&self, currency: &str) -> CartView {
        let lines: Vec<CartLine> = self
            .items
            .iter()
            .map(|item| {
                let unit_price = convert_from_usd(item.unit_usd(), currency);
                CartLine {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    unit_price,
                    qty: item.qty,
                    line_total: unit_price * i64::from(item.qty),
                }
            })
            .collect();

        let subtotal = lines.iter().map(|l| l.line_total).sum();

        CartView {
            currency: currency.to_string(),
            lines,
            subtotal,
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    fn persist(&self) {
        match serde_json::to_string(&self.items) {
            Ok(raw) => write_best_effort(self.store.as_ref(), CART_STORAGE_KEY, &raw),
            Err(err) => tracing::warn!(error = %err, "Failed to serialize cart"),
        }
    }
}

/// Anything but a JSON array is an empty cart. Entries that do not parse as a
/// line item are skipped.
fn parse_items(raw: &str) -> Vec<CartItem> {
    let Ok(serde_json::Value::Array(values)) = serde_json::from_str::<serde_json::Value>(raw)
    else {
        tracing::warn!("Stored cart is not a JSON array, starting empty");
        return Vec::new();
    };

    values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect()
}
