use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

use shared_config::AppConfig;

/// Open the Postgres connection pool. The pool is the single shared
/// persistence handle; it is created once at startup and closed by the
/// caller at shutdown.
pub async fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url())
        .await?;

    info!(
        "Connected to database {} at {}:{}",
        config.database_name, config.database_host, config.database_port
    );

    Ok(pool)
}
