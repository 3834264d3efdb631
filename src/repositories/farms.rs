use sqlx::PgPool;

use crate::error::Result;
use crate::models::Farm;

#[derive(Clone)]
pub struct FarmRepository {
    pool: PgPool,
}

impl FarmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Farm>> {
        let farm = sqlx::query_as::<_, Farm>(
            r#"
            SELECT id, name, location, created_at
            FROM farms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(farm)
    }
}
