//! Demo catalog seeding command.

use tracing::info;

use supermarket_core::{CatalogStore, ProductDraft, ProductFilter};
use supermarket_storefront::db::{self, PgCatalog};

use crate::commands::migrate::database_url;

const DEMO_PRODUCTS: &[(&str, Option<&str>, i64, &str)] = &[
    ("Apples", Some("/images/apples.jpg"), 50, "2.50"),
    ("Bananas", Some("/images/bananas.jpg"), 120, "0.60"),
    ("Baguette", Some("/images/baguette.jpg"), 10, "1.80"),
    ("Milk", Some("/images/milk.jpg"), 40, "1.20"),
    ("Eggs", None, 200, "3.10"),
    ("Cheddar", None, 25, "4.75"),
];

/// Seed the catalog with demo products.
///
/// Skips seeding when the catalog already has products unless `force` is
/// set, so re-running the command stays idempotent.
///
/// # Errors
///
/// Returns an error if the connection string is missing or a database
/// operation fails.
pub async fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = database_url()?;

    let pool = db::create_pool(&database_url).await?;
    let catalog = PgCatalog::new(pool);

    if !force {
        let probe = ProductFilter {
            limit: Some(1),
            ..ProductFilter::default()
        };
        let existing = catalog.list(&probe).await?;
        if !existing.is_empty() {
            info!("Catalog already has products, skipping seed (use --force to override)");
            return Ok(());
        }
    }

    for (name, image, quantity, price) in DEMO_PRODUCTS {
        let draft = ProductDraft::new(
            Some((*name).to_owned()),
            image.map(str::to_owned),
            Some(*quantity),
            Some(price.parse()?),
        )?;
        let product = catalog.create(draft).await?;
        info!(id = %product.id, name = %product.name, "Seeded product");
    }

    info!(count = DEMO_PRODUCTS.len(), "Seeding complete");
    Ok(())
}
