use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::error::ClientResult;

pub type DbPool = SqlitePool;

/// Open the local SQLite database and apply the schema in `migrations/`.
pub async fn create_pool(database_url: &str) -> ClientResult<DbPool> {
    // Every connection to `sqlite::memory:` gets its own database.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 4 };
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::debug!(database_url, "local storage ready");

    Ok(pool)
}
