use crate::config::Config;
use crate::error::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Connects using the configured URL, or returns `None` when no database is configured.
pub async fn pool_from_config(config: &Config) -> Result<Option<PgPool>> {
    match config.database_url.as_deref() {
        Some(url) => Ok(Some(
            create_pool(url, config.database_max_connections).await?,
        )),
        None => Ok(None),
    }
}
