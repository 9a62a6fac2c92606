use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use geoconvert_core::{GeoPoint, UtmZone};

use crate::dto::{ToDecimalRequest, ToDecimalResponse, ToUtmRequest, ToUtmResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/v1/convert/to-utm
pub async fn to_utm(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ToUtmRequest>, JsonRejection>,
) -> Result<Json<ToUtmResponse>, ApiError> {
    let Json(request) = payload?;
    let point = GeoPoint::new(request.latitude, request.longitude)?;
    let utm = state.converter.point_to_utm(point)?;

    tracing::info!(%point, %utm, "Converted point to UTM");
    Ok(Json(ToUtmResponse::new(point, utm)))
}

/// POST /api/v1/convert/to-decimal
pub async fn to_decimal(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ToDecimalRequest>, JsonRejection>,
) -> Result<Json<ToDecimalResponse>, ApiError> {
    let Json(request) = payload?;
    let zone = UtmZone::from_number(request.zone)?;
    let hemisphere = request.hemisphere.unwrap_or(state.config.hemisphere.value);
    let point = state.converter.utm_to_decimal(
        zone.number(),
        request.easting,
        request.northing,
        hemisphere,
    )?;

    tracing::info!(
        %zone,
        ?hemisphere,
        easting = request.easting,
        northing = request.northing,
        %point,
        "Converted UTM to decimal degrees"
    );
    Ok(Json(point.into()))
}
