//! # Menu Catalog
//!
//! Boundary to the menu collection: the remote document store the admin
//! edits and every customer reads.
//!
//! ## Read and Write Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Menu Collection Access                               │
//! │                                                                         │
//! │  Menu view                       Admin view                             │
//! │  ─────────                       ──────────                             │
//! │  fetch_menu() ──┐                upsert(admin, item) ──┐                │
//! │  get_item(id) ──┤                remove(admin, id) ────┤                │
//! │                 │                set_availability() ───┤                │
//! │                 ▼                                      ▼                │
//! │        ┌───────────────────┐             1. principal.is_admin()?       │
//! │        │  MenuSource       │◄──────────  2. validate_menu_item()        │
//! │        │  (trait object)   │             3. write                       │
//! │        └───────────────────┘                                            │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │        InMemoryMenu (JSON export loaded at startup)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart never reads back from here after an add: line items keep the
//! name and price captured at add time.

use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use feast_core::validation::validate_menu_item;
use feast_core::{MenuItem, Principal};

use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// Menu Source Trait
// =============================================================================

/// A menu collection the session can read and, as an admin, edit.
pub trait MenuSource: Send + Sync {
    /// Every menu record, in collection order.
    fn fetch_menu(&self) -> CatalogResult<Vec<MenuItem>>;

    /// Looks up a single record by id.
    fn get_item(&self, id: &str) -> CatalogResult<MenuItem> {
        self.fetch_menu()?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Inserts or replaces a record by id.
    fn upsert(&self, principal: &Principal, item: MenuItem) -> CatalogResult<()>;

    /// Deletes a record. Returns the removed record.
    fn remove(&self, principal: &Principal, id: &str) -> CatalogResult<MenuItem>;

    /// Flips the availability toggle shown on the menu card.
    fn set_availability(
        &self,
        principal: &Principal,
        id: &str,
        available: bool,
    ) -> CatalogResult<MenuItem>;
}

fn require_admin(principal: &Principal) -> CatalogResult<()> {
    if principal.is_admin() {
        Ok(())
    } else {
        debug!(uid = %principal.uid, "menu write rejected for non-admin");
        Err(CatalogError::Forbidden)
    }
}

// =============================================================================
// In-Memory Menu
// =============================================================================

/// Menu collection held in memory, seeded from a JSON array of records.
///
/// ## Document Format
/// ```json
/// [
///   { "id": "1", "name": "Margherita", "price": 249, "category": "Pizza",
///     "image": "https://cdn.example.com/margherita.jpg", "isAvailable": true }
/// ]
/// ```
#[derive(Debug, Default)]
pub struct InMemoryMenu {
    items: RwLock<Vec<MenuItem>>,
}

impl InMemoryMenu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        InMemoryMenu {
            items: RwLock::new(items),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a JSON export of the menu collection.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let items: Vec<MenuItem> = serde_json::from_str(json)?;
        Ok(Self::new(items))
    }

    /// Reads a JSON export from disk.
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let menu = Self::from_json_str(&contents)?;
        info!(?path, items = menu.len(), "Menu loaded");
        Ok(menu)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<MenuItem>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<MenuItem>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MenuSource for InMemoryMenu {
    fn fetch_menu(&self) -> CatalogResult<Vec<MenuItem>> {
        Ok(self.read().clone())
    }

    fn get_item(&self, id: &str) -> CatalogResult<MenuItem> {
        self.read()
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    fn upsert(&self, principal: &Principal, item: MenuItem) -> CatalogResult<()> {
        require_admin(principal)?;
        validate_menu_item(&item)?;

        let mut items = self.write();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                info!(id = %item.id, name = %item.name, "Menu item updated");
                *existing = item;
            }
            None => {
                info!(id = %item.id, name = %item.name, "Menu item added");
                items.push(item);
            }
        }

        Ok(())
    }

    fn remove(&self, principal: &Principal, id: &str) -> CatalogResult<MenuItem> {
        require_admin(principal)?;

        let mut items = self.write();
        let index = items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        let removed = items.remove(index);
        info!(id = %id, name = %removed.name, "Menu item removed");
        Ok(removed)
    }

    fn set_availability(
        &self,
        principal: &Principal,
        id: &str,
        available: bool,
    ) -> CatalogResult<MenuItem> {
        require_admin(principal)?;

        let mut items = self.write();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        item.is_available = available;
        info!(id = %id, available, "Menu item availability changed");
        Ok(item.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use feast_core::{Money, Role, ValidationError};

    const MENU_JSON: &str = r#"[
        {"id": "1", "name": "Margherita", "price": 249, "category": "Pizza",
         "image": "https://cdn.example.com/margherita.jpg", "isPopular": true},
        {"id": "2", "name": "Masala Soda", "price": 49.5, "category": "Drinks",
         "image": "https://cdn.example.com/soda.jpg"},
        {"id": "3", "name": "Dal Makhani", "price": 199,
         "image": "https://cdn.example.com/dal.jpg", "isAvailable": false}
    ]"#;

    fn admin() -> Principal {
        Principal {
            uid: "admin-1".into(),
            email: "owner@feast.example".into(),
            display_name: Some("Owner".into()),
            role: Role::Admin,
        }
    }

    fn customer() -> Principal {
        Principal {
            uid: "cust-1".into(),
            email: "asha@example.com".into(),
            display_name: None,
            role: Role::Customer,
        }
    }

    fn paneer() -> MenuItem {
        MenuItem {
            id: "4".into(),
            name: "Paneer Tikka".into(),
            price: Money::from_minor(22900),
            category: "Starters".into(),
            image: Some("https://cdn.example.com/paneer.jpg".into()),
            is_available: true,
            is_new: true,
            is_popular: false,
        }
    }

    #[test]
    fn test_load_from_json() {
        let menu = InMemoryMenu::from_json_str(MENU_JSON).unwrap();
        let items = menu.fetch_menu().unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[1].price.minor(), 4950);
        assert_eq!(items[2].category, "Main Dish");
        assert!(!items[2].is_available);
        // No flag in the record
        assert!(!items[0].is_available);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = InMemoryMenu::from_json_str("{ not json");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = InMemoryMenu::from_path(Path::new("/nonexistent/feast/menu.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_get_item() {
        let menu = InMemoryMenu::from_json_str(MENU_JSON).unwrap();

        assert_eq!(menu.get_item("2").unwrap().name, "Masala Soda");
        assert!(matches!(
            menu.get_item("999"),
            Err(CatalogError::NotFound(id)) if id == "999"
        ));
    }

    #[test]
    fn test_admin_upsert_adds_then_replaces() {
        let menu = InMemoryMenu::from_json_str(MENU_JSON).unwrap();

        menu.upsert(&admin(), paneer()).unwrap();
        assert_eq!(menu.len(), 4);

        let mut repriced = paneer();
        repriced.price = Money::from_minor(24900);
        menu.upsert(&admin(), repriced).unwrap();

        assert_eq!(menu.len(), 4);
        assert_eq!(menu.get_item("4").unwrap().price.minor(), 24900);
    }

    #[test]
    fn test_customer_cannot_write() {
        let menu = InMemoryMenu::from_json_str(MENU_JSON).unwrap();

        assert!(matches!(
            menu.upsert(&customer(), paneer()),
            Err(CatalogError::Forbidden)
        ));
        assert!(matches!(
            menu.remove(&customer(), "1"),
            Err(CatalogError::Forbidden)
        ));
        assert!(matches!(
            menu.set_availability(&customer(), "1", false),
            Err(CatalogError::Forbidden)
        ));
        assert_eq!(menu.len(), 3);
    }

    #[test]
    fn test_upsert_validates_item() {
        let menu = InMemoryMenu::empty();

        let mut nameless = paneer();
        nameless.name = "  ".into();
        assert!(matches!(
            menu.upsert(&admin(), nameless),
            Err(CatalogError::Validation(ValidationError::Required { .. }))
        ));

        let mut no_image = paneer();
        no_image.image = None;
        assert!(menu.upsert(&admin(), no_image).is_err());

        assert!(menu.is_empty());
    }

    #[test]
    fn test_remove_and_availability() {
        let menu = InMemoryMenu::from_json_str(MENU_JSON).unwrap();

        let removed = menu.remove(&admin(), "1").unwrap();
        assert_eq!(removed.name, "Margherita");
        assert!(matches!(
            menu.remove(&admin(), "1"),
            Err(CatalogError::NotFound(_))
        ));

        let dal = menu.set_availability(&admin(), "3", true).unwrap();
        assert!(dal.is_available);
        assert!(menu.get_item("3").unwrap().is_available);
    }
}
