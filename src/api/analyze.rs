use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use serde_json::Value;

use super::error::ApiError;
use crate::{
    analytics::{
        earnings, hourly, peak_hours, sports, summary, trends, trends::DailyCount, Analysis,
        HourBucket, PeakHours,
    },
    models::{CourtEarnings, FacilityId, FacilityKpis, SportActivity},
    DbPool,
};

pub const FACILITY_ID_FIELD: &str = "facilityId";

type AnalysisResult<T> = Result<Json<Analysis<T>>, ApiError>;

/// Request body as read by axum. Read failures (including bodies over the
/// size limit) are reported as `bad_request` rather than axum's plain text.
type RequestBody = Result<Bytes, BytesRejection>;

/// Extracts the facility identifier from a JSON request body.
pub fn facility_id_from_body(body: &[u8]) -> Result<FacilityId, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let fields = value
        .as_object()
        .ok_or_else(|| ApiError::BadRequest("expected a JSON object".to_string()))?;

    fields
        .get(FACILITY_ID_FIELD)
        .and_then(FacilityId::from_json)
        .ok_or(ApiError::MissingParameter(FACILITY_ID_FIELD))
}

fn run<T>(
    pool: &DbPool,
    body: RequestBody,
    name: &'static str,
    analysis: fn(&DbPool, FacilityId) -> anyhow::Result<Analysis<T>>,
) -> AnalysisResult<T> {
    let body = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let facility_id = facility_id_from_body(&body)?;

    let outcome = analysis(pool, facility_id).map_err(|e| {
        ApiError::UpstreamFailure(e.context(format!("{} for facility {}", name, facility_id)))
    })?;

    tracing::debug!(
        "Analyzed {} for facility {} (no_data={})",
        name,
        facility_id,
        outcome.is_no_data()
    );
    Ok(Json(outcome))
}

pub async fn peak_hours(
    State(pool): State<DbPool>,
    body: RequestBody,
) -> AnalysisResult<PeakHours> {
    run(&pool, body, "peak hours", peak_hours::analyze)
}

pub async fn hourly(
    State(pool): State<DbPool>,
    body: RequestBody,
) -> AnalysisResult<Vec<HourBucket>> {
    run(&pool, body, "hourly distribution", hourly::analyze)
}

pub async fn booking_trends(
    State(pool): State<DbPool>,
    body: RequestBody,
) -> AnalysisResult<Vec<DailyCount>> {
    run(&pool, body, "booking trends", trends::analyze)
}

pub async fn earnings(
    State(pool): State<DbPool>,
    body: RequestBody,
) -> AnalysisResult<Vec<CourtEarnings>> {
    run(&pool, body, "earnings", earnings::analyze)
}

pub async fn summary(
    State(pool): State<DbPool>,
    body: RequestBody,
) -> AnalysisResult<FacilityKpis> {
    run(&pool, body, "summary", summary::analyze)
}

pub async fn sports(
    State(pool): State<DbPool>,
    body: RequestBody,
) -> AnalysisResult<Vec<SportActivity>> {
    run(&pool, body, "sports", sports::analyze)
}
