//! # Menu Commands
//!
//! Browsing for every visitor; editing for admins.
//!
//! ## Admin Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save_menu_item / delete_menu_item / set_item_availability              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Signed in?  ── no ──► FORBIDDEN "Sign in to edit the menu"             │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  MenuSource write ── non-admin ──► FORBIDDEN                            │
//! │       │            ── bad form ──► VALIDATION_ERROR                     │
//! │       ▼                                                                 │
//! │  Ok(updated record)                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use feast_core::menu::{self, ALL_CATEGORIES};
use feast_core::{MenuItem, Principal};

use crate::error::ApiError;
use crate::session::Session;

/// Lists menu items matching the search box and category tab.
///
/// `None` for either argument means "no filter".
pub fn list_menu(
    session: &Session,
    search: Option<&str>,
    category: Option<&str>,
) -> Result<Vec<MenuItem>, ApiError> {
    let search = search.unwrap_or_default();
    let category = category.unwrap_or(ALL_CATEGORIES);
    debug!(search = %search, category = %category, "list_menu command");

    let items = session.menu().fetch_menu()?;
    let matched: Vec<MenuItem> = menu::filter_menu(&items, search, category)
        .into_iter()
        .cloned()
        .collect();

    debug!(count = matched.len(), "list_menu returned items");
    Ok(matched)
}

/// Category tab labels, `"All"` first.
pub fn menu_categories(session: &Session) -> Result<Vec<String>, ApiError> {
    debug!("menu_categories command");
    let items = session.menu().fetch_menu()?;
    Ok(menu::categories(&items))
}

pub fn get_menu_item(session: &Session, item_id: &str) -> Result<MenuItem, ApiError> {
    debug!(item_id = %item_id, "get_menu_item command");
    Ok(session.menu().get_item(item_id)?)
}

fn signed_in(session: &Session) -> Result<Principal, ApiError> {
    session
        .principal()
        .ok_or_else(|| ApiError::forbidden("Sign in to edit the menu"))
}

/// Creates or replaces a menu record (admin form "Save").
pub fn save_menu_item(session: &Session, item: MenuItem) -> Result<MenuItem, ApiError> {
    debug!(item_id = %item.id, name = %item.name, "save_menu_item command");

    let principal = signed_in(session)?;
    session.menu().upsert(&principal, item.clone())?;
    Ok(item)
}

pub fn delete_menu_item(session: &Session, item_id: &str) -> Result<MenuItem, ApiError> {
    debug!(item_id = %item_id, "delete_menu_item command");

    let principal = signed_in(session)?;
    Ok(session.menu().remove(&principal, item_id)?)
}

pub fn set_item_availability(
    session: &Session,
    item_id: &str,
    available: bool,
) -> Result<MenuItem, ApiError> {
    debug!(item_id = %item_id, available, "set_item_availability command");

    let principal = signed_in(session)?;
    Ok(session
        .menu()
        .set_availability(&principal, item_id, available)?)
}

// =============================================================================
// Unit Tests
// =============================================================================
