//! Cart store.
//!
//! [`CartStore`] is the single owner of the cart's line items. It restores
//! them from a [`KeyValueStore`] when opened and writes them back after every
//! mutation. Callers read snapshots through [`CartStore::items`] and change the
//! cart only through the mutators.
//!
//! # Persistence
//!
//! Each mutator builds the next item list, checks that its totals can be
//! computed, writes it to storage, and only then swaps it in. If any step
//! fails the error is returned and the in-memory cart is left exactly as it
//! was.
//!
//! # Restoring
//!
//! An unset key, or a stored JSON `null`, restores an empty cart. A value that
//! is present but cannot be decoded is corrupt and is handled according to
//! [`CorruptCartPolicy`].

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::storage::KeyValueStore;

mod error;
mod events;
mod line_item;
mod totals;

pub use error::CartError;
pub use events::{CartEvent, Listener};
pub use line_item::LineItem;
pub use totals::{CartTotals, TAX_RATE};

/// Storage key the cart is persisted under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cart";

/// What to do when the stored cart value is present but unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptCartPolicy {
    /// Log a warning and start with an empty cart.
    #[default]
    Reset,
    /// Refuse to open with [`CartError::Corrupt`].
    Fail,
}

impl FromStr for CorruptCartPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(Self::Reset),
            "fail" => Ok(Self::Fail),
            other => Err(format!("expected `reset` or `fail`, got `{other}`")),
        }
    }
}

/// The cart: ordered line items, their persistence, and derived totals.
pub struct CartStore<S> {
    storage: S,
    key: String,
    policy: CorruptCartPolicy,
    items: Vec<LineItem>,
    totals: CartTotals,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open a cart under [`DEFAULT_CART_KEY`] with the default corrupt-value
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the slot cannot be read.
    pub fn open_default(storage: S) -> Result<Self, CartError> {
        Self::open(storage, DEFAULT_CART_KEY, CorruptCartPolicy::default())
    }

    /// Open a cart persisted under `key` and restore its contents.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the slot cannot be read, or
    /// `CartError::Corrupt` if the stored value is unreadable and `policy` is
    /// [`CorruptCartPolicy::Fail`].
    pub fn open(
        storage: S,
        key: impl Into<String>,
        policy: CorruptCartPolicy,
    ) -> Result<Self, CartError> {
        let mut store = Self {
            storage,
            key: key.into(),
            policy,
            items: Vec::new(),
            totals: CartTotals::zero(),
            listeners: Vec::new(),
        };
        store.restore()?;
        Ok(store)
    }

    /// Reload the items from storage, replacing the in-memory cart.
    ///
    /// # Errors
    ///
    /// See [`CartStore::open`].
    pub fn restore(&mut self) -> Result<(), CartError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            self.items = Vec::new();
            self.totals = CartTotals::zero();
            return Ok(());
        };

        (self.items, self.totals) = match decode_items(&raw) {
            Ok(decoded) => decoded,
            Err(reason) => match self.policy {
                CorruptCartPolicy::Reset => {
                    warn!(key = %self.key, %reason, "Stored cart is corrupt, starting empty");
                    (Vec::new(), CartTotals::zero())
                }
                CorruptCartPolicy::Fail => {
                    return Err(CartError::Corrupt {
                        key: self.key.clone(),
                        reason,
                    });
                }
            },
        };

        debug!(key = %self.key, items = self.items.len(), "Restored cart");
        Ok(())
    }

    /// Write the current items to storage.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the write fails.
    pub fn persist(&mut self) -> Result<(), CartError> {
        write_items(&mut self.storage, &self.key, &self.items)
    }

    /// Add one unit of `name`. An existing line with the same name has its
    /// quantity bumped and keeps its original price; otherwise a new line is
    /// appended. Subscribers receive [`CartEvent::ItemAdded`] after the write.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if persisting fails,
    /// `CartError::QuantityOverflow` if the line is already at `u32::MAX`, or
    /// `CartError::AmountOverflow` if the cart total would no longer fit a
    /// `Decimal`.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        unit_price: Decimal,
    ) -> Result<(), CartError> {
        let name = name.into();
        let mut next = self.items.clone();

        if let Some(existing) = next.iter_mut().find(|item| item.name == name) {
            existing.quantity = existing
                .quantity
                .checked_add(1)
                .ok_or_else(|| CartError::QuantityOverflow { name: name.clone() })?;
        } else {
            next.push(LineItem::new(name.clone(), unit_price));
        }

        self.commit(next)?;
        debug!(%name, %unit_price, "Added item to cart");
        self.notify(&CartEvent::ItemAdded);
        Ok(())
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::IndexOutOfRange` if `index >= len()` (the cart is
    /// not touched), or `CartError::Storage` if persisting fails.
    pub fn remove_item(&mut self, index: usize) -> Result<(), CartError> {
        self.check_index(index)?;
        let mut next = self.items.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        debug!(index, name = %removed.name, "Removed item from cart");
        Ok(())
    }

    /// Add `delta` to the quantity of the line at `index`. A result of zero or
    /// less removes the line instead, so a quantity is never observably below 1.
    ///
    /// # Errors
    ///
    /// Returns `CartError::IndexOutOfRange` for a bad index,
    /// `CartError::QuantityOverflow` if the result exceeds `u32::MAX`,
    /// `CartError::AmountOverflow` if the cart total would no longer fit a
    /// `Decimal`, or `CartError::Storage` if persisting fails.
    pub fn update_quantity(&mut self, index: usize, delta: i64) -> Result<(), CartError> {
        let current = self.check_index(index)?.quantity;
        let requested = i64::from(current).saturating_add(delta);

        if requested <= 0 {
            return self.remove_item(index);
        }

        let quantity = u32::try_from(requested).map_err(|_| CartError::QuantityOverflow {
            name: self.items.get(index).map(|item| item.name.clone()).unwrap_or_default(),
        })?;

        let mut next = self.items.clone();
        if let Some(item) = next.get_mut(index) {
            item.quantity = quantity;
        }
        self.commit(next)?;
        debug!(index, quantity, "Updated cart quantity");
        Ok(())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if persisting fails.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.commit(Vec::new())?;
        debug!("Cleared cart");
        Ok(())
    }

    fn commit(&mut self, next: Vec<LineItem>) -> Result<(), CartError> {
        let totals = CartTotals::from_items(&next).ok_or(CartError::AmountOverflow)?;
        write_items(&mut self.storage, &self.key, &next)?;
        self.items = next;
        self.totals = totals;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<&LineItem, CartError> {
        self.items.get(index).ok_or(CartError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }
}

impl<S> CartStore<S> {
    /// Current line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Subtotal, tax and total for the current items.
    #[must_use]
    pub const fn compute_totals(&self) -> CartTotals {
        self.totals
    }

    /// Storage key this cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Register a callback for cart events.
    pub fn subscribe(&mut self, listener: impl Fn(&CartEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Borrow the underlying storage slot.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutably borrow the underlying storage slot.
    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Consume the store and hand back its storage slot.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn notify(&self, event: &CartEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage", &self.storage)
            .field("key", &self.key)
            .field("policy", &self.policy)
            .field("items", &self.items)
            .field("totals", &self.totals)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn write_items<S: KeyValueStore>(
    storage: &mut S,
    key: &str,
    items: &[LineItem],
) -> Result<(), CartError> {
    let encoded = serde_json::to_string(items)?;
    storage.set(key, &encoded)?;
    Ok(())
}

/// Decode a stored cart value, rejecting anything that breaks the cart
/// invariants.
fn decode_items(raw: &str) -> Result<(Vec<LineItem>, CartTotals), String> {
    let items: Option<Vec<LineItem>> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let items = items.unwrap_or_default();

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if item.quantity == 0 {
            return Err(format!("{} has quantity 0", item.name));
        }
        if item.price.is_sign_negative() && !item.price.is_zero() {
            return Err(format!("{} has negative price {}", item.name, item.price));
        }
        if !seen.insert(item.name.as_str()) {
            return Err(format!("{} appears more than once", item.name));
        }
    }

    let totals = CartTotals::from_items(&items).ok_or("cart total does not fit a decimal")?;
    Ok((items, totals))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    fn empty_store() -> CartStore<MemoryStore> {
        CartStore::open_default(MemoryStore::new()).unwrap()
    }

    fn stored(store: &CartStore<MemoryStore>) -> Option<&str> {
        store.storage().raw(DEFAULT_CART_KEY)
    }

    #[test]
    fn test_adding_same_name_twice_bumps_quantity() {
        let mut cart = empty_store();
        cart.add_item("Violin", dec!(65000)).unwrap();
        cart.add_item("Violin", dec!(65000)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_repeat_add_keeps_original_price() {
        let mut cart = empty_store();
        cart.add_item("Saxophone", dec!(135000)).unwrap();
        cart.add_item("Saxophone", dec!(1)).unwrap();

        assert_eq!(cart.items()[0].price, dec!(135000));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = empty_store();
        cart.add_item("Drum Set", dec!(245000)).unwrap();
        cart.add_item("Violin", dec!(65000)).unwrap();
        cart.add_item("Drum Set", dec!(245000)).unwrap();

        let names: Vec<&str> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Drum Set", "Violin"]);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_every_mutation_is_written_through() {
        let mut cart = empty_store();
        cart.add_item("Violin", dec!(65000)).unwrap();
        assert_eq!(
            stored(&cart),
            Some(r#"[{"name":"Violin","price":65000,"quantity":1}]"#)
        );

        cart.update_quantity(0, 2).unwrap();
        assert_eq!(
            stored(&cart),
            Some(r#"[{"name":"Violin","price":65000,"quantity":3}]"#)
        );

        cart.remove_item(0).unwrap();
        assert_eq!(stored(&cart), Some("[]"));

        cart.add_item("Violin", dec!(65000)).unwrap();
        cart.clear().unwrap();
        assert_eq!(stored(&cart), Some("[]"));
    }

    #[test]
    fn test_decrement_at_one_removes_line() {
        let mut cart = empty_store();
        cart.add_item("Violin", dec!(65000)).unwrap();
        cart.add_item("Bass Guitar", dec!(95000)).unwrap();

        cart.update_quantity(0, -1).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].name, "Bass Guitar");
    }

    #[test]
    fn test_large_negative_delta_removes_line() {
        let mut cart = empty_store();
        cart.add_item("Violin", dec!(65000)).unwrap();
        cart.update_quantity(0, i64::MIN).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_overflow_is_rejected() {
        let mut cart = empty_store();
        cart.add_item("Violin", dec!(65000)).unwrap();

        let err = cart.update_quantity(0, i64::MAX).unwrap_err();
        assert!(matches!(err, CartError::QuantityOverflow { .. }));
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_amount_overflow_is_rejected() {
        let mut cart = empty_store();
        let err = cart.add_item("Gold Piano", Decimal::MAX).unwrap_err();
        assert!(matches!(err, CartError::AmountOverflow));
        assert!(cart.is_empty());
        assert_eq!(stored(&cart), None);

        cart.add_item("Gold Piano", Decimal::MAX / dec!(4)).unwrap();
        let err = cart.update_quantity(0, 5).unwrap_err();
        assert!(matches!(err, CartError::AmountOverflow));
        assert_eq!(cart.items()[0].quantity, 1);

        let err = cart
            .add_item("Violin", dec!(70000000000000000000000000000))
            .unwrap_err();
        assert!(matches!(err, CartError::AmountOverflow));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_out_of_range_index_fails_without_change() {
        let mut cart = empty_store();
        cart.add_item("Violin", dec!(65000)).unwrap();
        let before = stored(&cart).map(str::to_owned);

        let err = cart.remove_item(1).unwrap_err();
        assert!(matches!(err, CartError::IndexOutOfRange { index: 1, len: 1 }));

        let err = cart.update_quantity(5, 1).unwrap_err();
        assert!(matches!(err, CartError::IndexOutOfRange { index: 5, len: 1 }));

        assert_eq!(cart.len(), 1);
        assert_eq!(stored(&cart).map(str::to_owned), before);
    }

    #[test]
    fn test_clear_then_totals_are_zero() {
        let mut cart = empty_store();
        cart.add_item("Digital Piano", dec!(185000)).unwrap();
        cart.add_item("Violin", dec!(65000)).unwrap();
        cart.clear().unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.compute_totals(), CartTotals::zero());
    }

    #[test]
    fn test_violin_totals() {
        let mut cart = empty_store();
        cart.add_item("Violin", dec!(65000)).unwrap();

        let totals = cart.compute_totals();
        assert_eq!(totals.subtotal, dec!(65000.00));
        assert_eq!(totals.tax, dec!(9750.00));
        assert_eq!(totals.total, dec!(74750.00));
    }

    #[test]
    fn test_persist_restore_roundtrip() {
        let mut cart = empty_store();
        cart.add_item("Electric Guitar", dec!(125000)).unwrap();
        cart.add_item("Violin", dec!(65000)).unwrap();
        cart.add_item("Electric Guitar", dec!(125000)).unwrap();
        let before = cart.items().to_vec();

        let reopened = CartStore::open_default(cart.into_storage()).unwrap();
        assert_eq!(reopened.items(), before.as_slice());
    }

    #[test]
    fn test_fractional_price_survives_restore_exactly() {
        let mut cart = empty_store();
        cart.add_item("Cleaning Kit", dec!(1234567.123456789012345)).unwrap();
        cart.add_item("Reed", dec!(0.10)).unwrap();

        let reopened = CartStore::open_default(cart.into_storage()).unwrap();
        assert_eq!(reopened.items()[0].price.to_string(), "1234567.123456789012345");
        assert_eq!(reopened.items()[1].price, dec!(0.1));
    }

    #[test]
    fn test_persist_rewrites_current_items() {
        let mut cart = empty_store();
        cart.add_item("Violin", dec!(65000)).unwrap();
        cart.storage_mut().remove(DEFAULT_CART_KEY).unwrap();
        assert_eq!(stored(&cart), None);

        cart.persist().unwrap();
        assert_eq!(
            stored(&cart),
            Some(r#"[{"name":"Violin","price":65000,"quantity":1}]"#)
        );

        cart.storage_mut().set_read_only(true);
        assert!(matches!(cart.persist(), Err(CartError::Storage(_))));
    }

    #[test]
    fn test_restore_missing_or_null_is_empty() {
        let cart = CartStore::open_default(MemoryStore::new()).unwrap();
        assert!(cart.is_empty());

        let cart = CartStore::open_default(MemoryStore::with_value("cart", "null")).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_restore_corrupt_resets_by_default() {
        for raw in [
            "{not json",
            r#"{"name":"Violin"}"#,
            r#"[{"name":"Violin","price":65000,"quantity":0}]"#,
            r#"[{"name":"Violin","price":-1,"quantity":1}]"#,
            r#"[{"name":"Violin","price":1,"quantity":1},{"name":"Violin","price":1,"quantity":2}]"#,
            r#"[{"name":"Gold Piano","price":79228162514264337593543950335,"quantity":2}]"#,
            r#"[{"name":"Gold Piano","price":1e28,"quantity":10}]"#,
        ] {
            let cart = CartStore::open_default(MemoryStore::with_value("cart", raw)).unwrap();
            assert!(cart.is_empty(), "expected reset for {raw}");
        }
    }

    #[test]
    fn test_restore_corrupt_fails_when_asked() {
        let storage = MemoryStore::with_value("cart", "{not json");
        let err = CartStore::open(storage, "cart", CorruptCartPolicy::Fail).unwrap_err();
        assert!(matches!(err, CartError::Corrupt { ref key, .. } if key == "cart"));
    }

    #[test]
    fn test_restore_rejects_totals_that_overflow() {
        let storage = MemoryStore::with_value(
            "cart",
            r#"[{"name":"Gold Piano","price":70000000000000000000000000000,"quantity":1}]"#,
        );
        let err = CartStore::open(storage, "cart", CorruptCartPolicy::Fail).unwrap_err();
        assert!(matches!(err, CartError::Corrupt { .. }));
    }

    #[test]
    fn test_reset_does_not_overwrite_corrupt_value_until_mutation() {
        let cart = CartStore::open_default(MemoryStore::with_value("cart", "garbage")).unwrap();
        assert_eq!(stored(&cart), Some("garbage"));
    }

    #[test]
    fn test_custom_key() {
        let mut cart = CartStore::open(MemoryStore::new(), "guest-cart", CorruptCartPolicy::Reset)
            .unwrap();
        cart.add_item("Violin", dec!(65000)).unwrap();

        assert_eq!(cart.key(), "guest-cart");
        assert!(cart.storage().raw("guest-cart").is_some());
        assert!(cart.storage().raw(DEFAULT_CART_KEY).is_none());
    }

    #[test]
    fn test_storage_failure_leaves_memory_unchanged() {
        let mut cart = empty_store();
        cart.add_item("Violin", dec!(65000)).unwrap();
        cart.storage_mut().set_read_only(true);

        let err = cart.add_item("Violin", dec!(65000)).unwrap_err();
        assert!(matches!(err, CartError::Storage(StorageError::Unavailable(_))));
        assert!(cart.clear().is_err());
        assert!(cart.update_quantity(0, -1).is_err());

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_item_added_event_fires_after_add_only() {
        let fired = Rc::new(Cell::new(0));
        let mut cart = empty_store();
        let counter = Rc::clone(&fired);
        cart.subscribe(move |event| {
            assert_eq!(*event, CartEvent::ItemAdded);
            counter.set(counter.get() + 1);
        });

        cart.add_item("Violin", dec!(65000)).unwrap();
        cart.add_item("Violin", dec!(65000)).unwrap();
        cart.update_quantity(0, 1).unwrap();
        cart.clear().unwrap();

        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_failed_add_does_not_notify() {
        let fired = Rc::new(Cell::new(false));
        let mut cart = empty_store();
        let flag = Rc::clone(&fired);
        cart.subscribe(move |_| flag.set(true));
        cart.storage_mut().set_read_only(true);

        assert!(cart.add_item("Violin", dec!(65000)).is_err());
        assert!(!fired.get());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("reset".parse::<CorruptCartPolicy>(), Ok(CorruptCartPolicy::Reset));
        assert_eq!("FAIL".parse::<CorruptCartPolicy>(), Ok(CorruptCartPolicy::Fail));
        assert!("ignore".parse::<CorruptCartPolicy>().is_err());
    }
}
