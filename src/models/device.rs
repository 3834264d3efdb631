use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
        }
    }

    pub fn from_db(value: &str) -> Result<Self, sqlx::Error> {
        match value {
            "online" => Ok(DeviceStatus::Online),
            "offline" => Ok(DeviceStatus::Offline),
            other => Err(sqlx::Error::Decode(
                format!("unknown device status: {}", other).into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SensorDevice {
    pub id: i64,
    pub farm_id: i64,
    pub hardware_id: String,
    pub name: String,
    pub status: DeviceStatus,
    pub last_seen_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub api_key_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for SensorDevice {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            id: row.try_get("id")?,
            farm_id: row.try_get("farm_id")?,
            hardware_id: row.try_get("hardware_id")?,
            name: row.try_get("name")?,
            status: DeviceStatus::from_db(&status)?,
            last_seen_at: row.try_get("last_seen_at")?,
            api_key_hash: row.try_get("api_key_hash")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterDeviceRequest {
    pub farm_id: i64,
    pub hardware_id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterDeviceResponse {
    pub device: SensorDevice,
    /// Plaintext key, returned exactly once at registration.
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct DeviceListResponse {
    pub devices: Vec<SensorDevice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_device() -> SensorDevice {
        SensorDevice {
            id: 7,
            farm_id: 1,
            hardware_id: "SN-0007".to_string(),
            name: "North field probe".to_string(),
            status: DeviceStatus::Offline,
            last_seen_at: None,
            api_key_hash: "$2b$12$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_round_trips_through_db_text() {
        assert_eq!(DeviceStatus::from_db("online").unwrap(), DeviceStatus::Online);
        assert_eq!(DeviceStatus::from_db("offline").unwrap(), DeviceStatus::Offline);
        assert_eq!(DeviceStatus::Online.as_str(), "online");
        assert!(DeviceStatus::from_db("rebooting").is_err());
    }

    #[test]
    fn test_api_key_hash_is_never_serialized() {
        let value = serde_json::to_value(sample_device()).unwrap();

        assert!(value.get("api_key_hash").is_none());
        assert_eq!(value["hardware_id"], "SN-0007");
        assert_eq!(value["status"], "offline");
    }
}
