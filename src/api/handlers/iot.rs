use axum::{extract::State, http::StatusCode, Json};

use super::AppState;
use crate::error::Result;
use crate::models::{IngestResponse, TelemetrySubmission};

/// POST /api/v1/iot/ingest
/// Accepts one telemetry reading, authenticated by the device credentials
/// embedded in the payload rather than by user identity.
pub async fn ingest(
    State(state): State<AppState>,
    Json(submission): Json<TelemetrySubmission>,
) -> Result<(StatusCode, Json<IngestResponse>)> {
    let reading = state.ingestion.ingest(submission).await?;

    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            success: true,
            reading_id: reading.id,
        }),
    ))
}
