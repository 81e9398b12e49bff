//! Database pool and migrations.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connect a pool sized from config and bring the portfolio schema up to
/// date before anything reads from it.
pub async fn create_pool_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}
