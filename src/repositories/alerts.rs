use sqlx::PgPool;

use crate::error::Result;
use crate::models::{Alert, CandidateAlert};

#[derive(Clone)]
pub struct AlertRepository {
    pool: PgPool,
}

impl AlertRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a candidate unless the device already has an unread alert with
    /// the same title. Relies on the partial unique index over unread alerts,
    /// so suppression holds even when ingestions race. Returns `None` when an
    /// open alert absorbed the candidate.
    pub async fn insert_unless_open(
        &self,
        farm_id: i64,
        device_id: i64,
        candidate: &CandidateAlert,
    ) -> Result<Option<Alert>> {
        let alert = sqlx::query_as::<_, Alert>(
            r#"
            INSERT INTO alerts (farm_id, device_id, title, description, level, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, FALSE, NOW())
            ON CONFLICT (device_id, title) WHERE NOT is_read DO NOTHING
            RETURNING id, farm_id, device_id, title, description, level, is_read, created_at
            "#,
        )
        .bind(farm_id)
        .bind(device_id)
        .bind(candidate.title)
        .bind(&candidate.description)
        .bind(candidate.level.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(alert)
    }

    /// All alerts for a farm, newest first.
    pub async fn list_by_farm(&self, farm_id: i64) -> Result<Vec<Alert>> {
        let alerts = sqlx::query_as::<_, Alert>(
            r#"
            SELECT id, farm_id, device_id, title, description, level, is_read, created_at
            FROM alerts
            WHERE farm_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(farm_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(alerts)
    }

    /// Mark one alert as read. Returns false when the alert does not exist.
    pub async fn mark_read(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE alerts
            SET is_read = TRUE
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
