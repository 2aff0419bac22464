//! Role gating.
//!
//! A pure decision table mapping (role, action) to allow/deny. The core
//! never inspects credentials; the host hands it an already-authenticated
//! role per request (absence of one means [`Role::Anonymous`]). Denial is a
//! terminal decision, not retried.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The role carried by the current request's identity.
///
/// This is the whole identity as far as the core is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// No authenticated identity.
    #[default]
    Anonymous,
    /// A signed-in customer.
    Shopper,
    /// Inventory staff.
    Admin,
}

impl Role {
    /// Parse a role from a trusted transport value (e.g. a proxy header).
    ///
    /// Unknown or missing values fall back to [`Role::Anonymous`] rather
    /// than erroring: an unrecognized identity is an unauthenticated one.
    #[must_use]
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            Some("shopper") => Self::Shopper,
            Some("admin") => Self::Admin,
            _ => Self::Anonymous,
        }
    }
}

/// Gated actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Browse the shopping listing and product detail pages.
    ViewShopping,
    /// View the inventory management listing.
    ViewInventory,
    /// Create, update or delete catalog entries.
    MutateCatalog,
    /// Add a product to the session cart.
    AddToCart,
    /// Empty a non-empty cart with a success signal.
    Checkout,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ViewShopping => "view-shopping",
            Self::ViewInventory => "view-inventory",
            Self::MutateCatalog => "mutate-catalog",
            Self::AddToCart => "add-to-cart",
            Self::Checkout => "checkout",
        };
        f.write_str(name)
    }
}

/// The policy table.
///
/// `AddToCart` allows exactly `Shopper`: the gating table is applied
/// literally, not as a role ordering (an admin is not a shopper).
#[must_use]
pub const fn allow(role: Role, action: Action) -> bool {
    match action {
        Action::ViewShopping | Action::Checkout => matches!(role, Role::Shopper | Role::Admin),
        Action::ViewInventory | Action::MutateCatalog => matches!(role, Role::Admin),
        Action::AddToCart => matches!(role, Role::Shopper),
    }
}

/// [`allow`] as a gate: `Err(AccessDenied)` when the table denies.
///
/// # Errors
///
/// Returns [`Error::AccessDenied`] carrying the denied action.
pub const fn authorize(role: Role, action: Action) -> Result<(), Error> {
    if allow(role, action) {
        Ok(())
    } else {
        Err(Error::AccessDenied(action))
    }
}
