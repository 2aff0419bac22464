//! Cart and checkout route handlers.
//!
//! The cart is an explicit value in the session. Every mutating handler
//! follows the same shape: authorize, load the cart, look up whatever the
//! mutation needs, apply exactly one cart operation, and persist the cart
//! only if the operation succeeded. A failed mutation leaves the stored
//! cart untouched.

use axum::{Form, Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use rust_decimal::Decimal;
use supermarket_core::{
    Action, Cart, CatalogStore, CheckoutReceipt, Error, authorize,
};

use crate::error::Result;
use crate::middleware::Identity;
use crate::models::session::keys;
use crate::routes::product_id_from;
use crate::state::AppState;

/// Cart payload returned by every cart endpoint.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Cart,
    pub total: Decimal,
}

impl CartResponse {
    fn new(cart: Cart) -> Self {
        let total = cart.total();
        Self { cart, total }
    }
}

/// Response for removals, which distinguish "removed" from "was absent".
#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub removed: bool,
    pub cart: Cart,
    pub total: Decimal,
}

/// POST /cart/add form fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddForm {
    pub product_id: i64,
    /// Defaults to one unit.
    pub quantity: Option<i64>,
}

/// POST /cart/update form fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateForm {
    pub product_id: i64,
    pub quantity: i64,
}

/// POST /cart/remove form fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveForm {
    pub product_id: i64,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the session cart, defaulting to an empty one.
async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Persist the cart back into the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

/// Parse a form quantity that must be strictly positive.
fn positive_quantity(raw: i64) -> Result<u32> {
    u32::try_from(raw)
        .ok()
        .filter(|quantity| *quantity > 0)
        .ok_or_else(|| Error::invalid("quantity must be a positive integer").into())
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /cart
#[instrument(skip(session))]
pub async fn show(session: Session, identity: Identity) -> Result<Json<CartResponse>> {
    authorize(identity.role, Action::ViewShopping)?;

    let cart = load_cart(&session).await?;
    Ok(Json(CartResponse::new(cart)))
}

/// POST /cart/add
#[instrument(skip(state, session))]
pub async fn add<C: CatalogStore>(
    State(state): State<AppState<C>>,
    session: Session,
    identity: Identity,
    Form(form): Form<AddForm>,
) -> Result<Json<CartResponse>> {
    authorize(identity.role, Action::AddToCart)?;

    let id = product_id_from(form.product_id)?;
    let quantity = positive_quantity(form.quantity.unwrap_or(1))?;

    let product = state
        .catalog()
        .get(id)
        .await?
        .ok_or_else(|| Error::not_found(format!("product {id}")))?;

    let mut cart = load_cart(&session).await?;
    cart.add_item(&product, quantity)?;
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse::new(cart)))
}

/// POST /cart/update
///
/// A quantity of zero or below removes the line.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    identity: Identity,
    Form(form): Form<UpdateForm>,
) -> Result<Json<CartResponse>> {
    authorize(identity.role, Action::AddToCart)?;

    let id = product_id_from(form.product_id)?;
    let quantity = if form.quantity <= 0 {
        0
    } else {
        positive_quantity(form.quantity)?
    };

    let mut cart = load_cart(&session).await?;
    cart.update_quantity(id, quantity)?;
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse::new(cart)))
}

/// POST /cart/remove
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    identity: Identity,
    Form(form): Form<RemoveForm>,
) -> Result<Json<RemoveResponse>> {
    authorize(identity.role, Action::AddToCart)?;

    let id = product_id_from(form.product_id)?;

    let mut cart = load_cart(&session).await?;
    let removed = cart.remove_item(id);
    save_cart(&session, &cart).await?;

    let total = cart.total();
    Ok(Json(RemoveResponse {
        removed,
        cart,
        total,
    }))
}

/// POST /cart/clear
#[instrument(skip(session))]
pub async fn clear(session: Session, identity: Identity) -> Result<Json<CartResponse>> {
    authorize(identity.role, Action::AddToCart)?;

    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse::new(cart)))
}

/// POST /checkout
///
/// The non-empty to empty transition. The emptied cart is persisted only
/// after the transition succeeds, so an empty-cart failure changes nothing.
#[instrument(skip(session))]
pub async fn checkout(session: Session, identity: Identity) -> Result<Json<CheckoutReceipt>> {
    authorize(identity.role, Action::Checkout)?;

    let mut cart = load_cart(&session).await?;
    let receipt = cart.checkout()?;
    save_cart(&session, &cart).await?;

    Ok(Json(receipt))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_quantity_bounds() {
        assert_eq!(positive_quantity(1).unwrap(), 1);
        assert_eq!(positive_quantity(250).unwrap(), 250);
        assert!(positive_quantity(0).is_err());
        assert!(positive_quantity(-3).is_err());
        assert!(positive_quantity(i64::from(u32::MAX) + 1).is_err());
    }
}
