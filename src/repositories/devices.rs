use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::{DeviceStatus, SensorDevice};

#[derive(Debug, Clone)]
pub struct NewDevice {
    pub farm_id: i64,
    pub hardware_id: String,
    pub name: String,
    pub api_key_hash: String,
}

#[derive(Clone)]
pub struct DeviceRepository {
    pool: PgPool,
}

impl DeviceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a device by the hardware id it presents during ingestion.
    pub async fn find_by_hardware_id(&self, hardware_id: &str) -> Result<Option<SensorDevice>> {
        let device = sqlx::query_as::<_, SensorDevice>(
            r#"
            SELECT id, farm_id, hardware_id, name, status, last_seen_at,
                   api_key_hash, created_at, updated_at
            FROM devices
            WHERE hardware_id = $1
            "#,
        )
        .bind(hardware_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(device)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<SensorDevice>> {
        let device = sqlx::query_as::<_, SensorDevice>(
            r#"
            SELECT id, farm_id, hardware_id, name, status, last_seen_at,
                   api_key_hash, created_at, updated_at
            FROM devices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(device)
    }

    /// Mark a device online and refresh its last-seen timestamp.
    pub async fn mark_online(&self, id: i64) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE devices
            SET status = $2, last_seen_at = NOW(), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(DeviceStatus::Online.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Register a device. New devices start offline until their first reading
    /// arrives.
    pub async fn insert(&self, new_device: &NewDevice) -> Result<SensorDevice> {
        let device = sqlx::query_as::<_, SensorDevice>(
            r#"
            INSERT INTO devices (farm_id, hardware_id, name, status, api_key_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, farm_id, hardware_id, name, status, last_seen_at,
                      api_key_hash, created_at, updated_at
            "#,
        )
        .bind(new_device.farm_id)
        .bind(&new_device.hardware_id)
        .bind(&new_device.name)
        .bind(DeviceStatus::Offline.as_str())
        .bind(&new_device.api_key_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict(
                format!("Device {} is already registered", new_device.hardware_id),
            ),
            other => AppError::Database(other),
        })?;

        Ok(device)
    }

    /// List devices, optionally scoped to one farm.
    pub async fn list(&self, farm_id: Option<i64>) -> Result<Vec<SensorDevice>> {
        let devices = match farm_id {
            Some(farm_id) => {
                sqlx::query_as::<_, SensorDevice>(
                    r#"
                    SELECT id, farm_id, hardware_id, name, status, last_seen_at,
                           api_key_hash, created_at, updated_at
                    FROM devices
                    WHERE farm_id = $1
                    ORDER BY id
                    "#,
                )
                .bind(farm_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, SensorDevice>(
                    r#"
                    SELECT id, farm_id, hardware_id, name, status, last_seen_at,
                           api_key_hash, created_at, updated_at
                    FROM devices
                    ORDER BY id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(devices)
    }
}
