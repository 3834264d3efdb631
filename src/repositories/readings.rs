use sqlx::PgPool;

use crate::error::Result;
use crate::models::{NewSensorReading, SensorReading};

#[derive(Clone)]
pub struct ReadingRepository {
    pool: PgPool,
}

impl ReadingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, reading: &NewSensorReading) -> Result<SensorReading> {
        let reading = sqlx::query_as::<_, SensorReading>(
            r#"
            INSERT INTO readings (
                device_id, ts, soil_moisture, temperature, humidity,
                nitrogen, phosphorus, potassium, ph, light_intensity, rainfall
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, device_id, ts, soil_moisture, temperature, humidity,
                      nitrogen, phosphorus, potassium, ph, light_intensity, rainfall
            "#,
        )
        .bind(reading.device_id)
        .bind(reading.ts)
        .bind(reading.soil_moisture)
        .bind(reading.temperature)
        .bind(reading.humidity)
        .bind(reading.nitrogen)
        .bind(reading.phosphorus)
        .bind(reading.potassium)
        .bind(reading.ph)
        .bind(reading.light_intensity)
        .bind(reading.rainfall)
        .fetch_one(&self.pool)
        .await?;

        Ok(reading)
    }

    /// Latest readings for one device, newest first.
    pub async fn list_recent(&self, device_id: i64, limit: i64) -> Result<Vec<SensorReading>> {
        let readings = sqlx::query_as::<_, SensorReading>(
            r#"
            SELECT id, device_id, ts, soil_moisture, temperature, humidity,
                   nitrogen, phosphorus, potassium, ph, light_intensity, rainfall
            FROM readings
            WHERE device_id = $1
            ORDER BY ts DESC
            LIMIT $2
            "#,
        )
        .bind(device_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(readings)
    }
}
