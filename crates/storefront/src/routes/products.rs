//! Shopping catalog route handlers.
//!
//! The browse surface for shoppers (admins may browse too). Listing input is
//! deserialized into closed enums, so an unrecognized `orderBy` or `order`
//! value is rejected at the query-string boundary with a 400.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use supermarket_core::{
    Action, CatalogStore, Error, OrderBy, Product, ProductFilter, SortOrder, authorize,
};

use crate::error::Result;
use crate::middleware::Identity;
use crate::routes::product_id_from;
use crate::state::AppState;

/// Listing query parameters, all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
    /// Page size; the listing is unbounded without it.
    pub limit: Option<u32>,
    /// Rows to skip, only honored together with `limit`.
    pub offset: Option<u32>,
    /// Sort column, one of `id`, `name`, `price`, `quantity`.
    pub order_by: Option<OrderBy>,
    /// Sort direction, `asc` or `desc`.
    pub order: Option<SortOrder>,
}

impl From<ListQuery> for ProductFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            search: query.search.filter(|s| !s.trim().is_empty()),
            limit: query.limit,
            offset: query.offset.unwrap_or(0),
            order_by: query.order_by.unwrap_or_default(),
            order: query.order.unwrap_or_default(),
        }
    }
}

/// GET /products
#[instrument(skip(state))]
pub async fn index<C: CatalogStore>(
    State(state): State<AppState<C>>,
    identity: Identity,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    authorize(identity.role, Action::ViewShopping)?;

    let products = state.catalog().list(&query.into()).await?;
    Ok(Json(products))
}

/// GET /products/{id}
#[instrument(skip(state))]
pub async fn show<C: CatalogStore>(
    State(state): State<AppState<C>>,
    identity: Identity,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    authorize(identity.role, Action::ViewShopping)?;

    let id = product_id_from(id)?;
    let product = state
        .catalog()
        .get(id)
        .await?
        .ok_or_else(|| Error::not_found(format!("product {id}")))?;
    Ok(Json(product))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_search_is_dropped() {
        let filter: ProductFilter = ListQuery {
            search: Some("   ".to_owned()),
            ..ListQuery::default()
        }
        .into();
        assert_eq!(filter.search, None);
    }

    #[test]
    fn test_defaults_fill_the_filter() {
        let filter: ProductFilter = ListQuery::default().into();
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn test_unknown_order_by_fails_deserialization() {
        let ok: std::result::Result<ListQuery, _> =
            serde_urlencoded::from_str("orderBy=price&order=desc");
        assert!(ok.is_ok());

        let bad: std::result::Result<ListQuery, _> =
            serde_urlencoded::from_str("orderBy=password");
        assert!(bad.is_err());
    }
}
