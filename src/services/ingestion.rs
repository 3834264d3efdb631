use tracing::debug;

use crate::auth::apikey;
use crate::error::{AppError, Result};
use crate::models::{SensorDevice, SensorReading, TelemetrySubmission};
use crate::repositories::{DeviceRepository, FarmRepository, ReadingRepository};
use crate::services::RecommendationService;

/// Runs one telemetry submission end to end: authenticate the device, mark it
/// online, persist the reading, then derive alerts. The stored reading is the
/// source of truth; nothing after the insert may fail the call.
#[derive(Clone)]
pub struct IngestionService {
    devices: DeviceRepository,
    readings: ReadingRepository,
    farms: FarmRepository,
    recommendations: RecommendationService,
}

impl IngestionService {
    pub fn new(
        devices: DeviceRepository,
        readings: ReadingRepository,
        farms: FarmRepository,
        recommendations: RecommendationService,
    ) -> Self {
        Self {
            devices,
            readings,
            farms,
            recommendations,
        }
    }

    pub async fn ingest(&self, submission: TelemetrySubmission) -> Result<SensorReading> {
        let device = self.authenticate(&submission).await?;

        self.devices.mark_online(device.id).await?;

        let reading = self
            .readings
            .insert(&submission.into_new_reading(device.id))
            .await?;

        match self.farms.find_by_id(device.farm_id).await? {
            Some(farm) => {
                let created = self
                    .recommendations
                    .process_reading(&farm, &device, &reading)
                    .await;
                if !created.is_empty() {
                    debug!(
                        device_id = device.id,
                        count = created.len(),
                        "alerts generated for reading"
                    );
                }
            }
            None => {
                // Orphaned device; the reading is still stored.
                debug!(
                    device_id = device.id,
                    farm_id = device.farm_id,
                    "farm not found, skipping alert evaluation"
                );
            }
        }

        Ok(reading)
    }

    /// Resolve the submitting device and check its API key against the stored
    /// hash. An unknown hardware id is reported distinctly from a bad key.
    async fn authenticate(&self, submission: &TelemetrySubmission) -> Result<SensorDevice> {
        let hardware_id = submission.device_id.as_deref().filter(|s| !s.is_empty());
        let api_key = submission.api_key.as_deref().filter(|s| !s.is_empty());

        let (hardware_id, api_key) = match (hardware_id, api_key) {
            (Some(hardware_id), Some(api_key)) => (hardware_id, api_key),
            _ => return Err(AppError::Auth("Missing device credentials".to_string())),
        };

        let device = self
            .devices
            .find_by_hardware_id(hardware_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Device not found".to_string()))?;

        if !apikey::verify_api_key(api_key, &device.api_key_hash)? {
            return Err(AppError::Auth("Invalid API key".to_string()));
        }

        Ok(device)
    }
}
