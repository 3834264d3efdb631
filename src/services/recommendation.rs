use tracing::{debug, warn};

use crate::models::{Alert, Farm, SensorDevice, SensorReading};
use crate::repositories::AlertRepository;
use crate::services::rules;

/// Turns persisted readings into stored alerts. Evaluation is synchronous on
/// the ingestion path, and storing alerts is best-effort: one failed candidate
/// is logged and skipped so it can never take telemetry ingestion down.
#[derive(Clone)]
pub struct RecommendationService {
    alerts: AlertRepository,
}

impl RecommendationService {
    pub fn new(alerts: AlertRepository) -> Self {
        Self { alerts }
    }

    /// Evaluate all threshold rules for one reading and persist whatever
    /// fires, suppressing candidates the device already has an open alert for.
    /// Returns the alerts actually created.
    pub async fn process_reading(
        &self,
        farm: &Farm,
        device: &SensorDevice,
        reading: &SensorReading,
    ) -> Vec<Alert> {
        let candidates = rules::evaluate(reading);
        let mut created = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            match self
                .alerts
                .insert_unless_open(farm.id, device.id, &candidate)
                .await
            {
                Ok(Some(alert)) => {
                    debug!(device_id = device.id, title = %alert.title, "alert created");
                    created.push(alert);
                }
                Ok(None) => {
                    debug!(
                        device_id = device.id,
                        title = candidate.title,
                        "open alert exists, candidate suppressed"
                    );
                }
                Err(e) => {
                    warn!(
                        device_id = device.id,
                        title = candidate.title,
                        "failed to store alert: {e}"
                    );
                }
            }
        }

        created
    }
}
