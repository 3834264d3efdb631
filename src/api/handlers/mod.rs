pub mod alerts;
pub mod devices;
pub mod health;
pub mod iot;

use sqlx::PgPool;

use crate::repositories::{AlertRepository, DeviceRepository, FarmRepository, ReadingRepository};
use crate::services::{IngestionService, RecommendationService};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub ingestion: IngestionService,
    pub devices: DeviceRepository,
    pub readings: ReadingRepository,
    pub farms: FarmRepository,
    pub alerts: AlertRepository,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let devices = DeviceRepository::new(pool.clone());
        let readings = ReadingRepository::new(pool.clone());
        let farms = FarmRepository::new(pool.clone());
        let alerts = AlertRepository::new(pool.clone());

        let recommendations = RecommendationService::new(alerts.clone());
        let ingestion = IngestionService::new(
            devices.clone(),
            readings.clone(),
            farms.clone(),
            recommendations,
        );

        Self {
            pool,
            ingestion,
            devices,
            readings,
            farms,
            alerts,
        }
    }
}
