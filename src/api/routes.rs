use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{alerts, devices, health, iot, AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no auth)
        .route("/health", get(health::health_check))
        // Device-facing ingestion, authenticated by payload credentials
        .route("/api/v1/iot/ingest", post(iot::ingest))
        // Dashboard-facing routes; user identity is enforced at the ingress
        .route("/api/v1/farms/{farm_id}/alerts", get(alerts::list_for_farm))
        .route("/api/v1/alerts/{alert_id}/read", post(alerts::mark_read))
        .route("/api/v1/devices", get(devices::list).post(devices::register))
        .route(
            "/api/v1/devices/{device_id}/readings",
            get(devices::readings),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
