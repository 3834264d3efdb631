use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SensorReading {
    pub id: i64,
    pub device_id: i64,
    pub ts: DateTime<Utc>,
    pub soil_moisture: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub ph: Option<f64>,
    pub light_intensity: Option<f64>,
    pub rainfall: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewSensorReading {
    pub device_id: i64,
    pub ts: DateTime<Utc>,
    pub soil_moisture: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub ph: Option<f64>,
    pub light_intensity: Option<f64>,
    pub rainfall: Option<f64>,
}

/// Telemetry payload as devices submit it. Field names follow the firmware
/// wire contract, so this is the one place the API speaks camelCase.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySubmission {
    pub device_id: Option<String>,
    pub api_key: Option<String>,
    pub soil_moisture: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    #[serde(rename = "pH")]
    pub ph: Option<f64>,
    pub light_intensity: Option<f64>,
    pub rainfall: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl TelemetrySubmission {
    /// Normalize into the canonical reading record, defaulting the timestamp
    /// to ingestion time when the device sent none.
    pub fn into_new_reading(self, device_id: i64) -> NewSensorReading {
        NewSensorReading {
            device_id,
            ts: self.timestamp.unwrap_or_else(Utc::now),
            soil_moisture: self.soil_moisture,
            temperature: self.temperature,
            humidity: self.humidity,
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            ph: self.ph,
            light_intensity: self.light_intensity,
            rainfall: self.rainfall,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub success: bool,
    pub reading_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ReadingListResponse {
    pub readings: Vec<SensorReading>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_submission_deserializes_firmware_field_names() {
        let payload = r#"{
            "deviceId": "SN-001",
            "apiKey": "abc123",
            "soilMoisture": 22.5,
            "temperature": 31.0,
            "pH": 6.4,
            "lightIntensity": 540.0,
            "timestamp": "2025-06-01T06:30:00Z"
        }"#;

        let submission: TelemetrySubmission = serde_json::from_str(payload).unwrap();

        assert_eq!(submission.device_id.as_deref(), Some("SN-001"));
        assert_eq!(submission.api_key.as_deref(), Some("abc123"));
        assert_eq!(submission.soil_moisture, Some(22.5));
        assert_eq!(submission.ph, Some(6.4));
        assert_eq!(submission.light_intensity, Some(540.0));
        assert_eq!(submission.nitrogen, None);
        assert!(submission.timestamp.is_some());
    }

    #[test]
    fn test_submission_tolerates_minimal_payload() {
        let submission: TelemetrySubmission = serde_json::from_str("{}").unwrap();

        assert_eq!(submission.device_id, None);
        assert_eq!(submission.api_key, None);
        assert_eq!(submission.timestamp, None);
    }

    #[test]
    fn test_into_new_reading_defaults_timestamp() {
        let submission: TelemetrySubmission =
            serde_json::from_str(r#"{"deviceId": "SN-001", "apiKey": "k"}"#).unwrap();

        let before = Utc::now();
        let reading = submission.into_new_reading(42);
        let after = Utc::now();

        assert_eq!(reading.device_id, 42);
        assert!(reading.ts >= before && reading.ts <= after);
    }

    #[test]
    fn test_into_new_reading_keeps_device_timestamp() {
        let submission: TelemetrySubmission = serde_json::from_str(
            r#"{"deviceId": "SN-001", "apiKey": "k", "timestamp": "2025-06-01T06:30:00Z"}"#,
        )
        .unwrap();

        let reading = submission.into_new_reading(42);

        assert_eq!(reading.ts.to_rfc3339(), "2025-06-01T06:30:00+00:00");
    }

    #[test]
    fn test_ingest_response_uses_wire_casing() {
        let response = IngestResponse {
            success: true,
            reading_id: 17,
        };

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["readingId"], 17);
    }
}
