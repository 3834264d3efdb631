use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::config::Config;
use crate::error::Result;

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(config: &Config) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(config.database_url())
        .await?;

    Ok(pool)
}
