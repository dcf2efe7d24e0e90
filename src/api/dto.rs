//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::charts::ChartSpec;

// ============================================
// CHART DTOs
// ============================================

/// Query string of GET /api/v1/charts
#[derive(Debug, Deserialize)]
pub struct ChartsQuery {
    /// Region code (NSW, NT, QL, SA, TA, VI, WA)
    pub region: String,
    pub year: i32,
}

/// One chart slot of the page
#[derive(Debug, Serialize)]
pub struct ChartPayload {
    /// Renderer-independent description
    pub spec: ChartSpec,
    /// plotly.js figure built from `spec`
    pub figure: serde_json::Value,
}

impl From<ChartSpec> for ChartPayload {
    fn from(spec: ChartSpec) -> Self {
        let figure = spec.to_plotly();
        Self { spec, figure }
    }
}

/// Response of GET /api/v1/charts
#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub region: String,
    pub year: i32,
    /// Mean estimated burned area per month (pie)
    pub plot1: ChartPayload,
    /// Mean fire-pixel count per month (bar)
    pub plot2: ChartPayload,
}

// ============================================
// DATASET DTOs
// ============================================

/// Response of GET /api/v1/dataset
#[derive(Debug, Serialize)]
pub struct DatasetSummaryResponse {
    pub source: String,
    pub records: usize,
    pub rows_skipped: usize,
    pub years: Vec<i32>,
    pub regions: Vec<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy" or "unhealthy"
    pub status: String,
    /// Dataset status: "ok" or "empty"
    pub dataset: String,
    /// Number of records served
    pub records: usize,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Crate version
    pub version: String,
}
