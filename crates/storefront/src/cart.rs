//! Persistent cart store.
//!
//! The cart is an ordered list of stock identifiers stored as a JSON array
//! under the `cart` key. Duplicates are allowed and represent repeated line
//! items. A missing or unreadable value is replaced with `[]` on load, so
//! callers never observe a corrupted cart.

use storefront_checkout_core::StockId;
use tracing::{debug, instrument, warn};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the JSON-encoded cart.
pub const CART_KEY: &str = "cart";

/// Encoding of an empty cart.
const EMPTY_CART: &str = "[]";

/// Cart persisted in a [`KeyValueStore`].
#[derive(Debug)]
pub struct CartStore<S> {
    store: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Wrap a key-value store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Release the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Return the current cart.
    ///
    /// Writes the empty-list sentinel when no cart exists yet, and overwrites
    /// the stored value with it when it is not a JSON array of strings.
    #[instrument(skip(self))]
    pub fn load(&mut self) -> Vec<StockId> {
        let raw = match self.store.get(CART_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to read cart, treating as missing");
                None
            }
        };

        let Some(raw) = raw else {
            debug!("No cart stored yet, writing empty cart");
            self.reset();
            return Vec::new();
        };

        match serde_json::from_str::<Vec<StockId>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    error = %e,
                    value = %raw.chars().take(100).collect::<String>(),
                    "Stored cart is corrupted, resetting"
                );
                self.reset();
                Vec::new()
            }
        }
    }

    /// Replace the cart with `entries`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save(&mut self, entries: &[StockId]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(entries)?;
        self.store.set(CART_KEY, &encoded)
    }

    /// Append a stock entry to the end of the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    #[instrument(skip_all, fields(stock_id = %id))]
    pub fn add(&mut self, id: StockId) -> Result<Vec<StockId>, StorageError> {
        let mut entries = self.load();
        entries.push(id);
        self.save(&entries)?;
        Ok(entries)
    }

    /// Remove the first occurrence of `id`.
    ///
    /// Returns `true` if an entry was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    #[instrument(skip_all, fields(stock_id = %id))]
    pub fn remove(&mut self, id: &StockId) -> Result<bool, StorageError> {
        let mut entries = self.load();
        let Some(pos) = entries.iter().position(|entry| entry == id) else {
            return Ok(false);
        };
        entries.remove(pos);
        self.save(&entries)?;
        Ok(true)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.set(CART_KEY, EMPTY_CART)
    }

    /// Number of entries, counting duplicates.
    pub fn count(&mut self) -> usize {
        self.load().len()
    }

    fn reset(&mut self) {
        if let Err(e) = self.store.set(CART_KEY, EMPTY_CART) {
            warn!(error = %e, "Failed to write empty cart");
        }
    }
}
