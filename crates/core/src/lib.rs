//! Supermarket Core - Domain library for the supermarket storefront.
//!
//! This crate holds everything with real state-transition logic:
//!
//! - [`cart`] - The session-scoped shopping cart engine (add/update/remove/
//!   clear/total/checkout) and its invariants
//! - [`catalog`] - The product catalog contract ([`CatalogStore`]) with a
//!   filtered/sorted/paged listing model, plus an in-memory implementation
//! - [`policy`] - The pure role-gating decision table
//! - [`product`] - Catalog entries and validated create/update drafts
//! - [`error`] - The shared error taxonomy returned by every operation
//!
//! # Architecture
//!
//! The crate contains no I/O. Persistence and transport live in the
//! `supermarket-storefront` host, which supplies a [`CatalogStore`]
//! implementation and persists the [`Cart`] value per session. Prices are
//! `rust_decimal` values throughout; binary floating point never touches
//! money.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod error;
pub mod policy;
pub mod product;
pub mod types;

pub use cart::{Cart, CartLine, CheckoutReceipt};
pub use catalog::{CatalogStore, MemoryCatalog, OrderBy, ProductFilter, SortOrder};
pub use error::Error;
pub use policy::{Action, Role, allow, authorize};
pub use product::{Product, ProductDraft};
pub use types::ProductId;
