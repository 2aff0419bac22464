//! Database migration command.
//!
//! Runs the catalog migrations from `crates/storefront/migrations/` against
//! the database named by `STOREFRONT_DATABASE_URL` (falling back to
//! `DATABASE_URL`). The session table is not managed here; the storefront's
//! session store migrates it at startup.

use secrecy::SecretString;
use tracing::info;

use supermarket_storefront::db;

/// Connection string resolution shared by the commands.
pub(crate) fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "STOREFRONT_DATABASE_URL not set".into())
}

/// Run catalog database migrations.
///
/// # Errors
///
/// Returns an error if the connection string is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = database_url()?;

    info!("Connecting to storefront database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running catalog migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    info!("Migrations complete");
    Ok(())
}
