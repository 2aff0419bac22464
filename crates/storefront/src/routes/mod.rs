//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Liveness check
//! GET    /health/ready              - Readiness check (catalog probe)
//!
//! # Shopping catalog (shopper or admin)
//! GET    /products                  - Product listing (search/sort/paging)
//! GET    /products/{id}             - Product detail
//!
//! # Inventory management (admin)
//! GET    /inventory                 - Inventory listing
//! POST   /inventory/products        - Create product
//! PUT    /inventory/products/{id}   - Update product
//! DELETE /inventory/products/{id}   - Delete product
//!
//! # Cart (session-scoped)
//! GET    /cart                      - Current cart with total
//! POST   /cart/add                  - Add product to cart
//! POST   /cart/update               - Set a line's quantity
//! POST   /cart/remove               - Remove a line
//! POST   /cart/clear                - Empty the cart
//!
//! # Checkout
//! POST   /checkout                  - Checkout transition
//! ```
//!
//! Every handler authorizes against the role policy before touching the
//! catalog or the session cart.

pub mod cart;
pub mod inventory;
pub mod products;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};
use serde_json::json;

use supermarket_core::{CatalogStore, Error, ProductId};

use crate::error::Result;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes<C: CatalogStore>() -> Router<AppState<C>> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the inventory routes router.
pub fn inventory_routes<C: CatalogStore>() -> Router<AppState<C>> {
    Router::new()
        .route("/", get(inventory::index))
        .route("/products", post(inventory::create))
        .route(
            "/products/{id}",
            put(inventory::update).delete(inventory::remove),
        )
}

/// Create the cart routes router.
pub fn cart_routes<C: CatalogStore>() -> Router<AppState<C>> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes<C: CatalogStore>() -> Router<AppState<C>> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .nest("/products", product_routes())
        .nest("/inventory", inventory_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
}

/// Liveness check.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness check: probes the catalog backend.
async fn ready<C: CatalogStore>(State(state): State<AppState<C>>) -> Result<Json<serde_json::Value>> {
    state.catalog().ping().await?;
    Ok(Json(json!({ "status": "ready" })))
}

/// Parse a client-supplied product id.
///
/// Ids are positive and fit the backing `i32` column; anything else is an
/// invalid argument rather than a lookup miss.
pub(crate) fn product_id_from(raw: i64) -> Result<ProductId> {
    let id = i32::try_from(raw)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| Error::invalid("id must be a positive integer"))?;
    Ok(ProductId::new(id))
}
