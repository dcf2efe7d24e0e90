//! Chart Routes
//!
//! - GET /api/v1/charts?region=NSW&year=2005 - Both charts for a selection

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ChartsQuery, ChartsResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dataset::Region;

/// GET /api/v1/charts
///
/// Recompute both charts for the current control values. A year or region
/// with no rows returns charts without points.
pub async fn get_charts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChartsQuery>,
) -> ApiResult<Json<ChartsResponse>> {
    let region: Region = params
        .region
        .parse()
        .map_err(|e: crate::dataset::DatasetError| ApiError::Validation(e.to_string()))?;

    let (area_chart, count_chart) = state.handler.handle(region, params.year);

    Ok(Json(ChartsResponse {
        region: region.code().to_string(),
        year: params.year,
        plot1: area_chart.into(),
        plot2: count_chart.into(),
    }))
}
