//! Inventory management route handlers.
//!
//! The admin-only catalog surface. Reads are gated on the inventory view
//! permission, writes on catalog mutation; anonymous and shopper requests
//! get a 403 before any catalog access.

use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use supermarket_core::{Action, CatalogStore, Product, ProductDraft, authorize};

use crate::error::Result;
use crate::middleware::Identity;
use crate::routes::{product_id_from, products::ListQuery};
use crate::state::AppState;

/// Product create/update form fields.
///
/// Every field is optional at the transport layer; [`ProductDraft::new`]
/// decides what is required and what gets a default.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: Option<String>,
    pub image: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
}

impl ProductForm {
    fn into_draft(self) -> Result<ProductDraft> {
        Ok(ProductDraft::new(
            self.name,
            self.image,
            self.quantity,
            self.price,
        )?)
    }
}

/// GET /inventory
#[instrument(skip(state))]
pub async fn index<C: CatalogStore>(
    State(state): State<AppState<C>>,
    identity: Identity,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    authorize(identity.role, Action::ViewInventory)?;

    let products = state.catalog().list(&query.into()).await?;
    Ok(Json(products))
}

/// POST /inventory/products
#[instrument(skip(state, form))]
pub async fn create<C: CatalogStore>(
    State(state): State<AppState<C>>,
    identity: Identity,
    Form(form): Form<ProductForm>,
) -> Result<(StatusCode, Json<Product>)> {
    authorize(identity.role, Action::MutateCatalog)?;

    let product = state.catalog().create(form.into_draft()?).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /inventory/products/{id}
#[instrument(skip(state, form))]
pub async fn update<C: CatalogStore>(
    State(state): State<AppState<C>>,
    identity: Identity,
    Path(id): Path<i64>,
    Form(form): Form<ProductForm>,
) -> Result<Json<Product>> {
    authorize(identity.role, Action::MutateCatalog)?;

    let id = product_id_from(id)?;
    let product = state.catalog().update(id, form.into_draft()?).await?;
    Ok(Json(product))
}

/// DELETE /inventory/products/{id}
#[instrument(skip(state))]
pub async fn remove<C: CatalogStore>(
    State(state): State<AppState<C>>,
    identity: Identity,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    authorize(identity.role, Action::MutateCatalog)?;

    let id = product_id_from(id)?;
    if state.catalog().delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(supermarket_core::Error::not_found(format!("product {id}")).into())
    }
}
