use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::AppState;
use crate::error::{AppError, Result};
use crate::models::AlertListResponse;

/// GET /api/v1/farms/{farm_id}/alerts
/// Returns all alerts for a farm, newest first.
pub async fn list_for_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<i64>,
) -> Result<Json<AlertListResponse>> {
    state
        .farms
        .find_by_id(farm_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Farm {} not found", farm_id)))?;

    let alerts = state.alerts.list_by_farm(farm_id).await?;

    Ok(Json(AlertListResponse { alerts }))
}

/// POST /api/v1/alerts/{alert_id}/read
/// Marks one alert as read, which reopens that rule for the device.
pub async fn mark_read(
    State(state): State<AppState>,
    Path(alert_id): Path<i64>,
) -> Result<StatusCode> {
    let found = state.alerts.mark_read(alert_id).await?;

    if !found {
        return Err(AppError::NotFound(format!("Alert {} not found", alert_id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
