//! Postgres-backed product catalog.
//!
//! Implements the core `CatalogStore` contract over the `products` table.
//! Queries use the runtime API with bound parameters throughout; the ORDER
//! BY column is chosen by matching on the closed `OrderBy` enum, never
//! spliced from user input.

use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use supermarket_core::{
    CatalogStore, Error, Product, ProductDraft, ProductFilter, ProductId, SortOrder,
};

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    /// Create a new catalog over a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, image, quantity, price";

fn storage(err: sqlx::Error) -> Error {
    Error::Storage(err.to_string())
}

fn product_from_row(row: &PgRow) -> Result<Product, Error> {
    Ok(Product {
        id: row.try_get::<ProductId, _>("id").map_err(storage)?,
        name: row.try_get("name").map_err(storage)?,
        image: row.try_get("image").map_err(storage)?,
        quantity: row.try_get("quantity").map_err(storage)?,
        price: row.try_get::<Decimal, _>("price").map_err(storage)?,
    })
}

impl CatalogStore for PgCatalog {
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, Error> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products"
        ));

        if let Some(search) = &filter.search {
            query.push(" WHERE name ILIKE ");
            query.push_bind(format!("%{search}%"));
        }

        query.push(" ORDER BY ");
        query.push(filter.order_by.column());
        query.push(match filter.order {
            SortOrder::Asc => " ASC",
            SortOrder::Desc => " DESC",
        });

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ");
            query.push_bind(i64::from(limit));
            // Offset without a limit is ignored, matching the listing
            // contract.
            if filter.offset > 0 {
                query.push(" OFFSET ");
                query.push_bind(i64::from(filter.offset));
            }
        }

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;

        rows.iter().map(product_from_row).collect()
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, Error> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, Error> {
        let row = sqlx::query(&format!(
            "INSERT INTO products (name, image, quantity, price) \
             VALUES ($1, $2, $3, $4) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.image)
        .bind(draft.quantity)
        .bind(draft.price)
        .fetch_one(&self.pool)
        .await
        .map_err(storage)?;

        product_from_row(&row)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, Error> {
        let row = sqlx::query(&format!(
            "UPDATE products SET name = $1, image = $2, quantity = $3, price = $4 \
             WHERE id = $5 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.image)
        .bind(draft.quantity)
        .bind(draft.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        match row {
            Some(row) => product_from_row(&row),
            None => Err(Error::not_found(format!("product {id}"))),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(())
    }
}
