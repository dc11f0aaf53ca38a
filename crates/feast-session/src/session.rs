//! # Session
//!
//! One customer's ordering session: the shared cart plus the services the
//! views call into.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Composition                                  │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ SessionConfig│ │  CartStore   │ │  MenuSource  │ │PaymentGateway│   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ read-only    │ │ Arc<Mutex<   │ │ Arc<dyn ..>  │ │ Arc<dyn ..>  │   │
//! │  │ after load   │ │   Cart>>     │ │              │ │              │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  principal: Mutex<Option<Principal>>   set by sign_in / sign_out       │
//! │  payment:   Mutex<Option<PaymentRecord>> set by a successful pay       │
//! │                                                                         │
//! │  end() ──► cart cleared, payment forgotten, principal signed out       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart knows nothing about payment state; the last payment lives here.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use feast_core::{PaymentRecord, Principal};

use crate::catalog::{InMemoryMenu, MenuSource};
use crate::config::SessionConfig;
use crate::payment::{MockGateway, PaymentGateway};
use crate::store::CartStore;

pub struct Session {
    config: SessionConfig,
    cart: CartStore,
    menu: Arc<dyn MenuSource>,
    gateway: Arc<dyn PaymentGateway>,
    principal: Mutex<Option<Principal>>,
    payment: Mutex<Option<PaymentRecord>>,
}

impl Session {
    /// Creates a session with an empty cart.
    pub fn new(
        config: SessionConfig,
        menu: Arc<dyn MenuSource>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        info!(store = %config.store.name, currency = %config.currency.code, "Session started");

        Session {
            config,
            cart: CartStore::new(),
            menu,
            gateway,
            principal: Mutex::new(None),
            payment: Mutex::new(None),
        }
    }

    /// Builds a session from config alone: the menu is read from
    /// `menu.path` and charges go through the mock gateway.
    ///
    /// A menu file that cannot be loaded leaves the menu empty.
    pub fn from_config(config: SessionConfig) -> Self {
        let menu = match &config.menu.path {
            Some(path) => InMemoryMenu::from_path(path).unwrap_or_else(|e| {
                warn!(?path, "Failed to load menu: {}. Starting with an empty menu.", e);
                InMemoryMenu::empty()
            }),
            None => InMemoryMenu::empty(),
        };

        Self::new(config, Arc::new(menu), Arc::new(MockGateway::new()))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The shared cart. Clone it to hand a handle to another view.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn menu(&self) -> &dyn MenuSource {
        self.menu.as_ref()
    }

    pub fn gateway(&self) -> &dyn PaymentGateway {
        self.gateway.as_ref()
    }

    // =========================================================================
    // Identity
    // =========================================================================

    pub fn sign_in(&self, principal: Principal) {
        info!(uid = %principal.uid, role = ?principal.role, "Signed in");
        *lock(&self.principal) = Some(principal);
    }

    pub fn sign_out(&self) {
        if let Some(principal) = lock(&self.principal).take() {
            info!(uid = %principal.uid, "Signed out");
        }
    }

    pub fn principal(&self) -> Option<Principal> {
        lock(&self.principal).clone()
    }

    // =========================================================================
    // Payment
    // =========================================================================

    /// Remembers a successful payment for the invoice view.
    pub fn record_payment(&self, record: PaymentRecord) {
        info!(
            payment_id = %record.payment_id,
            order = %record.order_number,
            amount = record.amount.minor(),
            "Payment recorded"
        );
        *lock(&self.payment) = Some(record);
    }

    pub fn last_payment(&self) -> Option<PaymentRecord> {
        lock(&self.payment).clone()
    }

    /// Ends the session: empties the cart and forgets payment and identity.
    pub fn end(&self) {
        self.cart.clear();
        lock(&self.payment).take();
        self.sign_out();
        info!("Session ended");
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.config.store.name)
            .field("cart", &self.cart)
            .field("principal", &self.principal())
            .field("payment", &self.last_payment())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
