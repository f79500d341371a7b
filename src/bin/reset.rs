use anyhow::bail;

use axum_courier_api::{
    config::AppConfig,
    db::{create_pool, reset_all_tables},
};

/// Empties every table. Test and demo environments only; the `--yes` flag is
/// mandatory so nobody wipes a database by tab-completing the wrong binary.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    if !std::env::args().any(|arg| arg == "--yes") {
        bail!("refusing to reset the database: pass --yes to confirm");
    }

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url, config.max_connections).await?;

    reset_all_tables(&pool).await?;

    println!("All data deleted");
    Ok(())
}
