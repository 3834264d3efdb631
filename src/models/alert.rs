use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Low,
    Medium,
    High,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Low => "LOW",
            AlertLevel::Medium => "MEDIUM",
            AlertLevel::High => "HIGH",
        }
    }

    pub fn from_db(value: &str) -> Result<Self, sqlx::Error> {
        match value {
            "LOW" => Ok(AlertLevel::Low),
            "MEDIUM" => Ok(AlertLevel::Medium),
            "HIGH" => Ok(AlertLevel::High),
            other => Err(sqlx::Error::Decode(
                format!("unknown alert level: {}", other).into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub id: i64,
    pub farm_id: i64,
    pub device_id: i64,
    pub title: String,
    pub description: String,
    pub level: AlertLevel,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for Alert {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let level: String = row.try_get("level")?;

        Ok(Self {
            id: row.try_get("id")?,
            farm_id: row.try_get("farm_id")?,
            device_id: row.try_get("device_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            level: AlertLevel::from_db(&level)?,
            is_read: row.try_get("is_read")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// A rule verdict that has not been persisted yet. The title doubles as the
/// deduplication key, so it must stay stable per rule.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateAlert {
    pub title: &'static str,
    pub description: String,
    pub level: AlertLevel,
}

#[derive(Debug, Serialize)]
pub struct AlertListResponse {
    pub alerts: Vec<Alert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_round_trips_through_db_text() {
        for level in [AlertLevel::Low, AlertLevel::Medium, AlertLevel::High] {
            assert_eq!(AlertLevel::from_db(level.as_str()).unwrap(), level);
        }
        assert!(AlertLevel::from_db("SEVERE").is_err());
    }

    #[test]
    fn test_level_serializes_uppercase() {
        let value = serde_json::to_value(AlertLevel::High).unwrap();
        assert_eq!(value, "HIGH");
    }
}
