//! # Validation Module
//!
//! Input validation for menu records saved from the admin view.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Admin form                                                    │
//! │  └── "Please fill all fields and upload an image"                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── name present and bounded                                           │
//! │  ├── price non-negative                                                 │
//! │  └── image present and absolute http(s)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Document store security rules (admin role)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart never validates: it accepts whatever snapshot it is handed.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::MenuItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 120;
const MAX_CATEGORY_LEN: usize = 60;

/// Validates a menu item name.
///
/// ```rust
/// use feast_core::validation::validate_menu_name;
///
/// assert!(validate_menu_name("Paneer Tikka").is_ok());
/// assert!(validate_menu_name("   ").is_err());
/// ```
pub fn validate_menu_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (complimentary items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates the image reference: required, absolute `http(s)` URL.
pub fn validate_image(image: Option<&str>) -> ValidationResult<()> {
    let image = image.map(str::trim).unwrap_or_default();

    if image.is_empty() {
        return Err(ValidationError::Required {
            field: "image".to_string(),
        });
    }

    let parsed = url::Url::parse(image).map_err(|e| ValidationError::InvalidFormat {
        field: "image".to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidFormat {
            field: "image".to_string(),
            reason: "must be an http or https URL".to_string(),
        });
    }

    Ok(())
}

/// Validates a category label. Empty is allowed (shown as the default).
pub fn validate_category(category: &str) -> ValidationResult<()> {
    if category.trim().chars().count() > MAX_CATEGORY_LEN {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: MAX_CATEGORY_LEN,
        });
    }

    Ok(())
}

/// Validates a whole menu record before it is written to the collection.
pub fn validate_menu_item(item: &MenuItem) -> ValidationResult<()> {
    if item.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    validate_menu_name(&item.name)?;
    validate_price(item.price)?;
    validate_category(&item.category)?;
    validate_image(item.image.as_deref())?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> MenuItem {
        MenuItem {
            id: "biryani".to_string(),
            name: "Chicken Biryani".to_string(),
            price: Money::from_minor(28000),
            category: "Rice".to_string(),
            image: Some("https://cdn.example.com/biryani.jpg".to_string()),
            is_available: true,
            is_new: false,
            is_popular: true,
        }
    }

    #[test]
    fn test_validate_menu_name() {
        assert!(validate_menu_name("Masala Dosa").is_ok());
        assert!(validate_menu_name("").is_err());
        assert!(validate_menu_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_minor(999)).is_ok());
        assert_eq!(
            validate_price(Money::from_minor(-1)),
            Err(ValidationError::MustBeNonNegative {
                field: "price".to_string()
            })
        );
    }

    #[test]
    fn test_validate_image() {
        assert!(validate_image(Some("https://cdn.example.com/a.png")).is_ok());
        assert!(validate_image(None).is_err());
        assert!(validate_image(Some("  ")).is_err());
        assert!(validate_image(Some("images/a.png")).is_err());
        assert!(validate_image(Some("ftp://cdn.example.com/a.png")).is_err());
    }

    #[test]
    fn test_validate_menu_item() {
        assert!(validate_menu_item(&item()).is_ok());

        let mut missing_image = item();
        missing_image.image = None;
        assert!(matches!(
            validate_menu_item(&missing_image),
            Err(ValidationError::Required { .. })
        ));

        let mut blank_id = item();
        blank_id.id = " ".to_string();
        assert!(validate_menu_item(&blank_id).is_err());
    }
}
