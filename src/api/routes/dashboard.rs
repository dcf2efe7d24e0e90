//! Dashboard Routes
//!
//! - GET / - Dashboard page
//! - GET /api/v1/layout - Control tree as JSON
//! - GET /api/v1/dataset - Summary of the loaded dataset

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::api::dto::DatasetSummaryResponse;
use crate::api::state::AppState;
use crate::layout::Layout;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.as_ref().clone())
}

/// GET /api/v1/layout
pub async fn get_layout(State(state): State<Arc<AppState>>) -> Json<Layout> {
    Json(state.layout.as_ref().clone())
}

/// GET /api/v1/dataset
pub async fn get_dataset_summary(
    State(state): State<Arc<AppState>>,
) -> Json<DatasetSummaryResponse> {
    Json(DatasetSummaryResponse {
        source: state.load_report.source.clone(),
        records: state.dataset.len(),
        rows_skipped: state.load_report.rows_skipped,
        years: state.dataset.years(),
        regions: state
            .dataset
            .regions()
            .iter()
            .map(|r| r.code().to_string())
            .collect(),
    })
}
