//! Catalog entries and validated mutation input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::ProductId;

/// A catalog entry.
///
/// Immutable from the cart's perspective: carts copy the fields they need at
/// add time and are never retroactively affected by catalog edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, positive identifier.
    pub id: ProductId,
    /// Display name, never empty.
    pub name: String,
    /// Optional reference to a stored image (path or URL).
    pub image: Option<String>,
    /// Stock on hand, never negative.
    pub quantity: i32,
    /// Unit price. Exact decimal, never binary floating point.
    pub price: Decimal,
}

/// Validated input for creating or updating a product.
///
/// Construction is the validation step: a draft that exists is a draft that
/// can be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub image: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

impl ProductDraft {
    /// Validate raw field input into a storable draft.
    ///
    /// The name is required and trimmed; quantity and price are coerced to
    /// be non-negative (absent values and negative inputs become zero,
    /// matching what the storefront forms have always done).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is missing or blank.
    pub fn new(
        name: Option<String>,
        image: Option<String>,
        quantity: Option<i64>,
        price: Option<Decimal>,
    ) -> Result<Self, Error> {
        let name = name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::invalid("name is required"))?
            .to_owned();

        let quantity = quantity
            .unwrap_or(0)
            .clamp(0, i64::from(i32::MAX))
            .try_into()
            .unwrap_or(0);

        let price = price.unwrap_or(Decimal::ZERO).max(Decimal::ZERO);

        let image = image.filter(|i| !i.trim().is_empty());

        Ok(Self {
            name,
            image,
            quantity,
            price,
        })
    }

    /// Materialize the draft into a product under a store-assigned id.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            image: self.image,
            quantity: self.quantity,
            price: self.price,
        }
    }
}
