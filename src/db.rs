use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};

pub type DbPool = PgPool;

/// Create the process-wide connection pool. The pool is owned by the
/// composition root and handed to every writer through axum state; nothing
/// else in the crate constructs a connection.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Empty every table, children before parents. Destructive; callers must
/// gate this behind an explicit trigger. Safe to run on an already-empty
/// database.
pub async fn reset_all_tables(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        TRUNCATE TABLE
            order_tracking,
            pricing_rules,
            orders,
            packages,
            addresses,
            courier_profiles,
            user_profiles,
            users
        CASCADE
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
