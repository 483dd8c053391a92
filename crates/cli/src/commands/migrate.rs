//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! paddock-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CART_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use sqlx::PgPool;

use super::{CommandError, database_url};

/// Run the cart database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to cart database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running cart migrations...");
    sqlx::migrate!("../cart/migrations").run(&pool).await?;

    tracing::info!("Cart migrations complete");
    Ok(())
}
