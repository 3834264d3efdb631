use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::AppState;
use crate::auth::apikey;
use crate::error::{AppError, Result};
use crate::models::{
    DeviceListResponse, ReadingListResponse, RegisterDeviceRequest, RegisterDeviceResponse,
};
use crate::repositories::NewDevice;

const DEFAULT_READINGS_LIMIT: i64 = 50;
const MAX_READINGS_LIMIT: i64 = 500;

#[derive(Debug, Deserialize)]
pub struct DeviceListQuery {
    pub farm_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReadingsQuery {
    pub limit: Option<i64>,
}

/// POST /api/v1/devices
/// Registers a device on a farm and returns its API key. The key is only
/// ever returned here; afterwards the server holds nothing but the hash.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterDeviceRequest>,
) -> Result<(StatusCode, Json<RegisterDeviceResponse>)> {
    if request.hardware_id.trim().is_empty() || request.name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "hardware_id and name are required".to_string(),
        ));
    }

    state
        .farms
        .find_by_id(request.farm_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Farm {} not found", request.farm_id)))?;

    let api_key = apikey::generate_api_key();
    let api_key_hash = apikey::hash_api_key(&api_key)?;

    let device = state
        .devices
        .insert(&NewDevice {
            farm_id: request.farm_id,
            hardware_id: request.hardware_id,
            name: request.name,
            api_key_hash,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterDeviceResponse { device, api_key }),
    ))
}

/// GET /api/v1/devices?farm_id=
/// Lists devices, optionally scoped to one farm.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DeviceListQuery>,
) -> Result<Json<DeviceListResponse>> {
    let devices = state.devices.list(query.farm_id).await?;

    Ok(Json(DeviceListResponse { devices }))
}

/// GET /api/v1/devices/{device_id}/readings?limit=
/// Latest readings for a device, newest first.
pub async fn readings(
    State(state): State<AppState>,
    Path(device_id): Path<i64>,
    Query(query): Query<ReadingsQuery>,
) -> Result<Json<ReadingListResponse>> {
    state
        .devices
        .find_by_id(device_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Device {} not found", device_id)))?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_READINGS_LIMIT)
        .clamp(1, MAX_READINGS_LIMIT);

    let readings = state.readings.list_recent(device_id, limit).await?;

    Ok(Json(ReadingListResponse { readings }))
}
