//! Database access for the storefront `PostgreSQL` instance.
//!
//! # Tables
//!
//! - `products` - The catalog (see `migrations/0001_products.sql`)
//! - `tower_sessions` - Session storage, created by the session store's own
//!   migration at startup
//!
//! # Migrations
//!
//! Catalog migrations live in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p supermarket-cli -- migrate
//! ```

pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use products::PgCatalog;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
