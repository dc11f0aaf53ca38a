//! # Cart Store
//!
//! The observable cart shared by every view of a session.
//!
//! ## Sharing
//! `CartStore` is a cheap handle: cloning it yields another handle to the
//! SAME cart. The session creates one and hands clones to the menu, cart,
//! payment and invoice views and the navbar badge.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  View Action              Store Method            Cart Change           │
//! │  ───────────              ────────────            ───────────           │
//! │                                                                         │
//! │  Click "Add" ────────────► add(item) ───────────► items.push(item)     │
//! │                                                                         │
//! │  Click "−" ──────────────► remove_one(id) ──────► first match removed  │
//! │                                                                         │
//! │  Click "Remove" ─────────► remove_all(id) ──────► every match removed  │
//! │                                                                         │
//! │  Click "Clear" ──────────► clear() ─────────────► items.clear()        │
//! │                                                                         │
//! │  1. lock cart, mutate, build CartSnapshot, unlock                       │
//! │  2. call every observer with the snapshot (lock NOT held)               │
//! │                                                                         │
//! │  No-op mutations (absent id) change nothing and notify nobody.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Observers always receive a freshly derived snapshot; grouped view and
//! totals are recomputed, never patched.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::trace;

use feast_core::{Cart, CartLineItem, GroupedCartEntry, Money};

// =============================================================================
// Snapshot
// =============================================================================

/// Read model handed to observers after each mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub grouped: Vec<GroupedCartEntry>,
    /// Total units (navbar badge).
    pub item_count: usize,
    #[serde(with = "feast_core::money::decimal")]
    pub total_price: Money,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            items: cart.items().to_vec(),
            grouped: cart.grouped_view(),
            item_count: cart.item_count(),
            total_price: cart.total_price(),
        }
    }
}

// =============================================================================
// Observers
// =============================================================================

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(&CartSnapshot) + Send + Sync>;

struct Shared {
    cart: Mutex<Cart>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_id: AtomicU64,
}

// =============================================================================
// Cart Store
// =============================================================================

/// Shared, observable cart for one session.
///
/// ## Thread Safety
/// The cart sits behind `Arc<Mutex<_>>` so handles can be moved across
/// threads; the lock is held only for the mutation and the snapshot.
/// A poisoned lock is recovered: the cart is plain data and every operation
/// leaves it consistent.
#[derive(Clone)]
pub struct CartStore {
    shared: Arc<Shared>,
}

impl CartStore {
    /// Creates an empty cart with no observers.
    pub fn new() -> Self {
        CartStore {
            shared: Arc::new(Shared {
                cart: Mutex::new(Cart::new()),
                observers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Appends one unit of an item.
    pub fn add(&self, item: CartLineItem) {
        self.mutate(|cart| {
            cart.add(item);
            ((), true)
        })
    }

    /// Removes one unit of `id`. Returns `false` for an absent id.
    pub fn remove_one(&self, id: &str) -> bool {
        self.mutate(|cart| {
            let removed = cart.remove_one(id);
            (removed, removed)
        })
    }

    /// Removes every unit of `id`. Returns the number removed.
    pub fn remove_all(&self, id: &str) -> usize {
        self.mutate(|cart| {
            let removed = cart.remove_all(id);
            (removed, removed > 0)
        })
    }

    pub fn clear(&self) {
        self.mutate(|cart| {
            cart.clear();
            ((), true)
        })
    }

    /// Runs a mutation under the lock, then notifies observers if it
    /// changed the cart.
    fn mutate<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> (R, bool),
    {
        let (result, snapshot) = {
            let mut cart = self.lock_cart();
            let (result, changed) = f(&mut *cart);
            (result, changed.then(|| CartSnapshot::from(&*cart)))
        };

        if let Some(snapshot) = snapshot {
            self.notify(&snapshot);
        }

        result
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Executes a function with read access to the cart.
    ///
    /// ```rust
    /// use feast_session::store::CartStore;
    ///
    /// let store = CartStore::new();
    /// assert!(store.with_cart(|cart| cart.is_empty()));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.lock_cart();
        f(&*cart)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.with_cart(|cart| CartSnapshot::from(cart))
    }

    pub fn item_count(&self) -> usize {
        self.with_cart(Cart::item_count)
    }

    pub fn total_price(&self) -> Money {
        self.with_cart(Cart::total_price)
    }

    pub fn grouped_view(&self) -> Vec<GroupedCartEntry> {
        self.with_cart(Cart::grouped_view)
    }

    pub fn quantity_of(&self, id: &str) -> u32 {
        self.with_cart(|cart| cart.quantity_of(id))
    }

    pub fn is_empty(&self) -> bool {
        self.with_cart(Cart::is_empty)
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Registers an observer called synchronously after every effective
    /// mutation.
    ///
    /// Observers may call back into the store; they run without the cart
    /// lock held.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&CartSnapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.shared.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock_observers().push((id, Arc::new(observer)));
        trace!(subscription = id.0, "cart observer subscribed");
        id
    }

    /// Removes an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.lock_observers();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        before != observers.len()
    }

    pub fn observer_count(&self) -> usize {
        self.lock_observers().len()
    }

    fn notify(&self, snapshot: &CartSnapshot) {
        // Copy the list so observers can subscribe/unsubscribe re-entrantly
        let observers: Vec<Observer> = self
            .lock_observers()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        trace!(
            observers = observers.len(),
            item_count = snapshot.item_count,
            "notifying cart observers"
        );

        for observer in observers {
            observer(snapshot);
        }
    }

    fn lock_cart(&self) -> MutexGuard<'_, Cart> {
        self.shared.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_observers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Observer)>> {
        self.shared
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &*self.lock_cart())
            .field("observers", &self.observer_count())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
