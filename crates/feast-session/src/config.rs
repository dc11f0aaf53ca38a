//! # Session Configuration
//!
//! Storefront, currency and checkout settings, loaded once when a session
//! starts.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FEAST_STORE_NAME="Spice Route"                                     │
//! │     FEAST_TAX_RATE=5        (percent)                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/feast/feast.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.feast.feast/feast.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     INR, ₹, no tax, no delivery fee                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Spice Route"
//! address = ["12 MG Road", "Bengaluru 560001"]
//! contact_email = "hello@spiceroute.example"
//!
//! [currency]
//! code = "INR"
//! symbol = "₹"
//!
//! [checkout]
//! tax_rate_bps = 0
//! delivery_fee_minor = 0
//!
//! [menu]
//! path = "data/menu.json"
//! ```
//!
//! Read-only after load; no mutex needed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use feast_core::{Money, TaxRate};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Sections
// =============================================================================

/// Storefront identity printed on invoices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default)]
    pub address: Vec<String>,

    #[serde(default)]
    pub contact_email: Option<String>,
}

fn default_store_name() -> String {
    "Feast Kitchen".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: default_store_name(),
            address: Vec::new(),
            contact_email: None,
        }
    }
}

/// Currency the menu is priced in and the gateway charges in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// ISO 4217 code.
    #[serde(default = "default_currency_code")]
    pub code: String,

    #[serde(default = "default_currency_symbol")]
    pub symbol: String,
}

fn default_currency_code() -> String {
    "INR".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        CurrencyConfig {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
        }
    }
}

/// Charges added on top of the cart total at checkout.
///
/// Both default to zero, so the amount charged equals the cart total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Tax in basis points (500 = 5%).
    #[serde(default)]
    pub tax_rate_bps: u32,

    /// Flat delivery fee in minor units.
    #[serde(default)]
    pub delivery_fee_minor: i64,
}

impl CheckoutConfig {
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    pub fn delivery_fee(&self) -> Money {
        Money::from_minor(self.delivery_fee_minor)
    }
}

/// Where the menu collection is read from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuConfig {
    /// JSON export of the menu collection. `None` starts with an empty menu.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Session Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub currency: CurrencyConfig,

    #[serde(default)]
    pub checkout: CheckoutConfig,

    #[serde(default)]
    pub menu: MenuConfig,
}

impl SessionConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (feast.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading session config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load session config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml::to_string_pretty(self)?)?;

        info!(?path, "Session config saved");
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let code = &self.currency.code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Invalid(format!(
                "currency code must be three uppercase letters, got: '{}'",
                code
            )));
        }

        if self.checkout.tax_rate_bps > 10_000 {
            return Err(ConfigError::Invalid(
                "tax_rate_bps must be between 0 and 10000".into(),
            ));
        }

        if self.checkout.delivery_fee_minor < 0 {
            return Err(ConfigError::Invalid(
                "delivery_fee_minor must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Applies `FEAST_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are
    /// ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("FEAST_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(code) = lookup("FEAST_CURRENCY_CODE") {
            debug!(code = %code, "Overriding currency code from environment");
            self.currency.code = code.to_uppercase();
        }

        if let Some(symbol) = lookup("FEAST_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        // Percent, e.g. "5" or "8.25"
        if let Some(rate) = lookup("FEAST_TAX_RATE") {
            match rate.parse::<f64>() {
                Ok(pct) if pct >= 0.0 => {
                    self.checkout.tax_rate_bps = (pct * 100.0).round() as u32;
                }
                _ => warn!(rate = %rate, "Ignoring invalid FEAST_TAX_RATE"),
            }
        }

        if let Some(fee) = lookup("FEAST_DELIVERY_FEE") {
            match fee.parse::<i64>() {
                Ok(minor) => self.checkout.delivery_fee_minor = minor,
                Err(_) => warn!(fee = %fee, "Ignoring invalid FEAST_DELIVERY_FEE"),
            }
        }

        if let Some(path) = lookup("FEAST_MENU_PATH") {
            debug!(path = %path, "Overriding menu path from environment");
            self.menu.path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "feast", "feast")
            .map(|dirs| dirs.config_dir().join("feast.toml"))
    }

    /// Formats money with the configured currency symbol.
    ///
    /// ```rust
    /// use feast_core::Money;
    /// use feast_session::config::SessionConfig;
    ///
    /// let config = SessionConfig::default();
    /// assert_eq!(config.format_currency(Money::from_minor(2148)), "₹21.48");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let magnitude = Money::from_minor(amount.minor().abs());
        format!("{}{}{}", sign, self.currency.symbol, magnitude)
    }
}
