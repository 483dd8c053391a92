//! Catalog seeding command.
//!
//! Inserts a small sample product catalog so a fresh database can serve
//! cart requests. Skips seeding when the catalog already has rows, so it
//! is safe to run repeatedly.

use sqlx::PgPool;

use super::{CommandError, database_url};

const SAMPLE_PRODUCTS: &[(&str, &str, &str, &str)] = &[
    (
        "Merino ewes",
        "Two-year-old ewes from a certified flock",
        "9500.00",
        "USD",
    ),
    (
        "Suffolk rams",
        "Breeding rams, health-checked",
        "12000.00",
        "USD",
    ),
    (
        "Alpine goats",
        "Dairy goats in milk",
        "7800.00",
        "USD",
    ),
    (
        "Hereford heifers",
        "Yearling heifers, pasture-raised",
        "21000.00",
        "USD",
    ),
];

/// Seed the product catalog with sample data.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to cart database...");
    let pool = PgPool::connect(&database_url).await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        tracing::info!("Catalog already has {existing} products, skipping seed");
        return Ok(());
    }

    for (name, description, price, currency) in SAMPLE_PRODUCTS {
        sqlx::query(
            r"
            INSERT INTO product (product_name, description, price, currency)
            VALUES ($1, $2, $3::numeric, $4)
            ",
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(currency)
        .execute(&pool)
        .await?;
    }

    tracing::info!("Seeded {} products", SAMPLE_PRODUCTS.len());
    Ok(())
}
