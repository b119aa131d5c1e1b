//! Persistent cart storage.
//!
//! Each shopper's cart lives in a single named slot, read as a whole when a
//! page needs it and rewritten as a whole on every mutation. The store is
//! an explicit trait held in application state so tests can swap in the
//! in-memory double.
//!
//! Slot content is shopper-adjacent state and cannot be trusted: a slot
//! that fails to parse loads as an empty cart instead of erroring.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use loomline_core::Cart;
use thiserror::Error;
use uuid::Uuid;

/// Failure writing a cart slot.
#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("cart storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cart serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Whole-slot cart persistence.
pub trait CartStore: Send + Sync {
    /// Load a cart. Missing or malformed slots load as an empty cart.
    fn load(&self, id: Uuid) -> Cart;

    /// Replace the slot with the given cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError`] if the slot cannot be written.
    fn save(&self, id: Uuid, cart: &Cart) -> Result<(), CartStoreError>;

    /// Remove the slot entirely.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError`] if the slot cannot be removed.
    fn clear(&self, id: Uuid) -> Result<(), CartStoreError>;
}

/// File-backed store: one JSON file per cart id under a directory.
#[derive(Debug)]
pub struct FileCartStore {
    dir: PathBuf,
}

impl FileCartStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn slot_path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl CartStore for FileCartStore {
    fn load(&self, id: Uuid) -> Cart {
        let path = self.slot_path(id);
        let Ok(raw) = std::fs::read_to_string(&path) else {
            return Cart::new();
        };
        match serde_json::from_str(&raw) {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!(slot = %path.display(), error = %e, "discarding malformed cart slot");
                Cart::new()
            }
        }
    }

    fn save(&self, id: Uuid, cart: &Cart) -> Result<(), CartStoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let serialized = serde_json::to_string(cart)?;
        std::fs::write(self.slot_path(id), serialized)?;
        Ok(())
    }

    fn clear(&self, id: Uuid) -> Result<(), CartStoreError> {
        match std::fs::remove_file(self.slot_path(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CartStoreError::Io(e)),
        }
    }
}

/// In-memory store, used as the test double.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    slots: Mutex<HashMap<Uuid, Cart>>,
}

impl MemoryCartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self, id: Uuid) -> Cart {
        self.slots
            .lock()
            .map(|slots| slots.get(&id).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn save(&self, id: Uuid, cart: &Cart) -> Result<(), CartStoreError> {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(id, cart.clone());
        }
        Ok(())
    }

    fn clear(&self, id: Uuid) -> Result<(), CartStoreError> {
        if let Ok(mut slots) = self.slots.lock() {
            slots.remove(&id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use loomline_core::CartItem;
    use loomline_core::types::{Category, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(CartItem {
            id: ProductId::new(1),
            name: "Orbit Tote".to_string(),
            price: Decimal::new(1500, 0),
            image: String::new(),
            inspiration: Some("space".to_string()),
            category: Some(Category::Bags),
            size: None,
            added_at: DateTime::<Utc>::UNIX_EPOCH,
        });
        cart
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileCartStore::new(dir.path().to_path_buf());
        let id = Uuid::new_v4();

        assert!(store.load(id).is_empty());

        let cart = sample_cart();
        store.save(id, &cart).expect("save");
        assert_eq!(store.load(id), cart);

        store.clear(id).expect("clear");
        assert!(store.load(id).is_empty());
    }

    #[test]
    fn test_malformed_slot_loads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileCartStore::new(dir.path().to_path_buf());
        let id = Uuid::new_v4();

        std::fs::write(dir.path().join(format!("{id}.json")), "{not json")
            .expect("write garbage");
        assert!(store.load(id).is_empty());
    }

    #[test]
    fn test_clear_missing_slot_is_ok() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileCartStore::new(dir.path().to_path_buf());
        assert!(store.clear(Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_each_save_replaces_the_slot() {
        let store = MemoryCartStore::new();
        let id = Uuid::new_v4();

        let mut cart = sample_cart();
        store.save(id, &cart).expect("save");
        cart.remove(ProductId::new(1));
        store.save(id, &cart).expect("save");

        assert!(store.load(id).is_empty());
    }
}
