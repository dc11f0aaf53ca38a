//! # Cart
//!
//! The shopping cart: an ordered sequence of line items where quantity is
//! represented by repetition.
//!
//! ## Representation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add(Pizza) add(Pizza) add(Soda)                                        │
//! │                                                                         │
//! │  items:   [ Pizza 9.99 ] [ Pizza 9.99 ] [ Soda 1.50 ]   ◄── stored     │
//! │                 │              │             │                          │
//! │                 └──────┬───────┘             │                          │
//! │                        ▼                     ▼                          │
//! │  grouped: [ Pizza ×2  19.98 ]       [ Soda ×1  1.50 ]  ◄── derived     │
//! │                                                                         │
//! │  item_count()  = items.len()            = 3                             │
//! │  total_price() = Σ items.price          = 21.48                         │
//! │                = Σ grouped.line_total   = 21.48                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//! | Operation      | Effect                                   | Fails? |
//! |----------------|------------------------------------------|--------|
//! | `add`          | append one unit, no dedup                | never  |
//! | `remove_one`   | drop the first unit with the id, if any  | never  |
//! | `remove_all`   | drop every unit with the id              | never  |
//! | `clear`        | drop everything                          | never  |
//!
//! Reads (`grouped_view`, `total_price`, `item_count`) never mutate.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartLineItem, GroupedCartEntry};

/// The cart for one session.
///
/// ## Invariants
/// - Insertion order is chronological add order
/// - Entries sharing an `id` are interchangeable units of the same item
/// - There is no quantity field; `item_count() == items().len()`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Appends one unit. Never deduplicates.
    pub fn add(&mut self, item: CartLineItem) {
        self.items.push(item);
    }

    /// Removes one unit of `id`: the first match in sequence order.
    ///
    /// Returns `false` (and leaves the cart untouched) when no entry has
    /// that id, so calling it more times than the item's count is safe.
    pub fn remove_one(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every unit of `id`. Returns how many were removed.
    pub fn remove_all(&mut self, id: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The line items in add order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Total units in the cart (not distinct items).
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Units of a single menu item.
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.items.iter().filter(|item| item.id == id).count() as u32
    }

    /// Sum of every line item's price. Unrounded; format for display only.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(|item| item.price).sum()
    }

    /// Groups line items by id, one entry per distinct id.
    ///
    /// ## Ordering
    /// Groups appear in order of first appearance in the cart.
    ///
    /// ## Known Limitation
    /// Display fields come from the FIRST line item with the id. If the menu
    /// price changed between two adds of the same item, the group shows the
    /// first captured price while `total_price()` still sums each captured
    /// price individually.
    pub fn grouped_view(&self) -> Vec<GroupedCartEntry> {
        let mut groups: Vec<GroupedCartEntry> = Vec::new();

        for item in &self.items {
            match groups.iter_mut().find(|group| group.id == item.id) {
                Some(group) => {
                    group.quantity += 1;
                    group.line_total = group.price * group.quantity;
                }
                None => groups.push(GroupedCartEntry {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    price: item.price,
                    image: item.image.clone(),
                    quantity: 1,
                    line_total: item.price,
                }),
            }
        }

        groups
    }
}

impl FromIterator<CartLineItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartLineItem>>(iter: I) -> Self {
        Cart {
            items: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
