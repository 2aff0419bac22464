//! The product catalog contract and its in-memory implementation.
//!
//! [`CatalogStore`] is the seam between the core and whatever durable store
//! the host wires in. The listing model is a closed configuration: the
//! sortable column set is a fixed enum, so user input can never name an
//! arbitrary column.

use std::future::Future;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::product::{Product, ProductDraft};
use crate::types::ProductId;

/// Columns a listing may be ordered by.
///
/// Deliberately a closed set: unknown column names fail deserialization at
/// the transport boundary instead of reaching a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Id,
    Name,
    Price,
    Quantity,
}

impl OrderBy {
    /// The backing column name. Total over the enum, so every reachable
    /// value maps to a known column.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Price => "price",
            Self::Quantity => "quantity",
        }
    }
}

/// Listing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Listing configuration.
///
/// An empty filter returns all products ordered by id ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,
    /// Maximum rows returned; unbounded if absent.
    pub limit: Option<u32>,
    /// Rows to skip. Ignored when `limit` is absent.
    pub offset: u32,
    /// Sort column.
    pub order_by: OrderBy,
    /// Sort direction.
    pub order: SortOrder,
}

/// Read/write access to the product catalog.
///
/// Point lookups return `Ok(None)` for unknown ids; it is the caller's call
/// whether that becomes a `NotFound`. Mutations report `NotFound`
/// themselves. Infrastructure failures surface as [`Error::Storage`].
pub trait CatalogStore: Send + Sync + 'static {
    /// List products matching `filter`, in filter order.
    fn list(&self, filter: &ProductFilter)
    -> impl Future<Output = Result<Vec<Product>, Error>> + Send;

    /// Look up a single product.
    fn get(&self, id: ProductId) -> impl Future<Output = Result<Option<Product>, Error>> + Send;

    /// Store a new product and return it with its assigned id.
    fn create(&self, draft: ProductDraft) -> impl Future<Output = Result<Product, Error>> + Send;

    /// Replace the fields of an existing product.
    fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> impl Future<Output = Result<Product, Error>> + Send;

    /// Delete a product, reporting whether it existed.
    fn delete(&self, id: ProductId) -> impl Future<Output = Result<bool, Error>> + Send;

    /// Cheap connectivity probe for readiness checks.
    fn ping(&self) -> impl Future<Output = Result<(), Error>> + Send;
}

/// In-memory [`CatalogStore`] used by tests and the seedable demo path.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    inner: RwLock<MemoryCatalogInner>,
}

#[derive(Debug, Default)]
struct MemoryCatalogInner {
    next_id: i32,
    products: Vec<Product>,
}

impl MemoryCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn apply_filter(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
        let mut matched: Vec<Product> = match &filter.search {
            Some(needle) => {
                let needle = needle.to_lowercase();
                products
                    .iter()
                    .filter(|p| p.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            None => products.to_vec(),
        };

        matched.sort_by(|a, b| {
            let ordering = match filter.order_by {
                OrderBy::Id => a.id.cmp(&b.id),
                OrderBy::Name => a.name.cmp(&b.name),
                OrderBy::Price => a.price.cmp(&b.price),
                OrderBy::Quantity => a.quantity.cmp(&b.quantity),
            };
            match filter.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        // Offset without a limit is ignored, like the listing has always
        // behaved.
        if let Some(limit) = filter.limit {
            matched
                .into_iter()
                .skip(filter.offset as usize)
                .take(limit as usize)
                .collect()
        } else {
            matched
        }
    }
}

impl CatalogStore for MemoryCatalog {
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, Error> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(Self::apply_filter(&inner.products, filter))
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, Error> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, Error> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.next_id += 1;
        let product = draft.into_product(ProductId::new(inner.next_id));
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, Error> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match inner.products.iter_mut().find(|p| p.id == id) {
            Some(slot) => {
                *slot = draft.into_product(id);
                Ok(slot.clone())
            }
            None => Err(Error::not_found(format!("product {id}"))),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<bool, Error> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        Ok(inner.products.len() < before)
    }

    async fn ping(&self) -> Result<(), Error> {
        Ok(())
    }
}
