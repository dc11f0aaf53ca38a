//! # Menu Browsing
//!
//! Category tabs and search filtering for the menu view.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ All ] [ Pizza ] [ Drinks ] [ Main Dish ]      🔍 "pan"               │
//! │                                                                         │
//! │  categories(items)  → tab labels, "All" first                          │
//! │  filter_menu(items, search, tab) → cards shown                          │
//! │                                                                         │
//! │  A card matches when BOTH hold:                                         │
//! │   • name contains the search term (case-insensitive)                    │
//! │   • tab is "All" or equals the item's category                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::MenuItem;

/// Label of the catch-all category tab.
pub const ALL_CATEGORIES: &str = "All";

/// Tab labels: `"All"` followed by each distinct category in first
/// appearance order.
///
/// The leading tab is not deduplicated against the records: a category
/// literally named `"All"` gets its own second tab, which filters the same
/// as the first.
///
/// ```rust
/// use feast_core::menu::categories;
///
/// assert_eq!(categories(&[]), vec!["All".to_string()]);
/// ```
pub fn categories(items: &[MenuItem]) -> Vec<String> {
    let mut labels = vec![ALL_CATEGORIES.to_string()];

    for item in items {
        if !labels.iter().skip(1).any(|label| *label == item.category) {
            labels.push(item.category.clone());
        }
    }

    labels
}

/// Returns whether a menu item matches the search term and category tab.
///
/// The term is used as typed, whitespace included.
pub fn matches(item: &MenuItem, search: &str, category: &str) -> bool {
    let matches_search = item
        .name
        .to_lowercase()
        .contains(&search.to_lowercase());
    let matches_category = category == ALL_CATEGORIES || item.category == category;

    matches_search && matches_category
}

/// Filters menu items for display, preserving source order.
pub fn filter_menu<'a>(items: &'a [MenuItem], search: &str, category: &str) -> Vec<&'a MenuItem> {
    items
        .iter()
        .filter(|item| matches(item, search, category))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn item(id: &str, name: &str, category: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            price: Money::from_minor(10000),
            category: category.to_string(),
            image: None,
            is_available: true,
            is_new: false,
            is_popular: false,
        }
    }

    fn menu() -> Vec<MenuItem> {
        vec![
            item("1", "Paneer Pizza", "Pizza"),
            item("2", "Mango Lassi", "Drinks"),
            item("3", "Farmhouse Pizza", "Pizza"),
            item("4", "Paneer Butter Masala", "Main Dish"),
        ]
    }

    #[test]
    fn test_categories_are_distinct_in_first_appearance_order() {
        assert_eq!(categories(&menu()), vec!["All", "Pizza", "Drinks", "Main Dish"]);
    }

    #[test]
    fn test_filter_all_with_empty_search_returns_everything() {
        let menu = menu();
        assert_eq!(filter_menu(&menu, "", ALL_CATEGORIES).len(), 4);
    }

    #[test]
    fn test_filter_search_is_case_insensitive() {
        let menu = menu();
        let ids: Vec<_> = filter_menu(&menu, "PANEER", ALL_CATEGORIES)
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_filter_combines_search_and_category() {
        let menu = menu();
        let ids: Vec<_> = filter_menu(&menu, "paneer", "Pizza")
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1"]);

        assert!(filter_menu(&menu, "lassi", "Pizza").is_empty());
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        let menu = menu();
        assert!(filter_menu(&menu, "", "Desserts").is_empty());
    }

    #[test]
    fn test_search_whitespace_is_significant() {
        let menu = menu();
        assert!(filter_menu(&menu, " paneer", ALL_CATEGORIES).is_empty());

        let ids: Vec<_> = filter_menu(&menu, "paneer ", ALL_CATEGORIES)
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_category_named_all_gets_its_own_tab() {
        let menu = vec![item("1", "Thali", "All"), item("2", "Soda", "Drinks")];

        assert_eq!(categories(&menu), vec!["All", "All", "Drinks"]);
        assert_eq!(filter_menu(&menu, "", "All").len(), 2);
    }
}
