//! Cart hydration: turning stored stock ids into priced cart lines.
//!
//! The `/stock/` endpoint makes no promise about response order, so lines are
//! matched by identifier and laid out in the order the cart first mentions
//! each id.

use std::collections::HashMap;

use storefront_checkout_core::{CurrencyCode, Price, PriceError, StockId};

use super::types::HydratedStock;

/// One distinct stock variant in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub stock: HydratedStock,
    /// How many times the cart lists this stock id.
    pub quantity: u32,
}

impl CartLine {
    /// Returns true if the requested quantity is available.
    #[must_use]
    pub const fn is_within_stock(&self) -> bool {
        self.quantity <= self.stock.quantity
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the total does not fit.
    pub fn total(&self, currency: CurrencyCode) -> Result<Price, PriceError> {
        self.stock.price(currency).checked_mul(self.quantity)
    }
}

/// A cart with every entry resolved against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydratedCart {
    pub lines: Vec<CartLine>,
    /// Cart entries the service did not return (deleted or unknown stock).
    pub missing: Vec<StockId>,
}

impl HydratedCart {
    /// Returns true if the cart has no resolvable lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Lines asking for more units than are available.
    pub fn over_stock(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter().filter(|l| !l.is_within_stock())
    }

    /// Sum of all line totals.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the sum does not fit.
    pub fn subtotal(&self, currency: CurrencyCode) -> Result<Price, PriceError> {
        self.lines
            .iter()
            .try_fold(Price::zero(currency), |acc, line| {
                acc.checked_add(line.total(currency)?)
            })
    }
}

/// Distinct ids in order of first appearance.
#[must_use]
pub fn distinct_ids(entries: &[StockId]) -> Vec<StockId> {
    let mut seen = Vec::with_capacity(entries.len());
    for id in entries {
        if !seen.contains(id) {
            seen.push(id.clone());
        }
    }
    seen
}

/// Match hydrated stock records to cart entries by id.
#[must_use]
pub fn hydrate(entries: &[StockId], stocks: Vec<HydratedStock>) -> HydratedCart {
    let mut counts: HashMap<&StockId, u32> = HashMap::new();
    for id in entries {
        *counts.entry(id).or_insert(0) += 1;
    }

    let mut by_id: HashMap<StockId, HydratedStock> =
        stocks.into_iter().map(|s| (s.id.clone(), s)).collect();

    let mut cart = HydratedCart::default();
    for id in distinct_ids(entries) {
        let quantity = counts.get(&id).copied().unwrap_or(0);
        match by_id.remove(&id) {
            Some(stock) => cart.lines.push(CartLine { stock, quantity }),
            None => cart.missing.push(id),
        }
    }
    cart
}
