//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use super::error::ApiResult;
use crate::charts::SelectionHandler;
use crate::dataset::{Dataset, LoadReport};
use crate::layout::{html, Layout};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only dataset loaded at startup
    pub dataset: Arc<Dataset>,
    /// Summary of the dataset load
    pub load_report: Arc<LoadReport>,
    /// (region, year) → charts
    pub handler: SelectionHandler,
    /// Control tree of the page
    pub layout: Arc<Layout>,
    /// Pre-rendered dashboard page
    pub page: Arc<String>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Build the state, rendering the dashboard page once
    pub fn new(dataset: Arc<Dataset>, load_report: LoadReport, layout: Layout) -> ApiResult<Self> {
        let page = html::render_page(&layout)?;

        Ok(Self {
            handler: SelectionHandler::new(Arc::clone(&dataset)),
            dataset,
            load_report: Arc::new(load_report),
            layout: Arc::new(layout),
            page: Arc::new(page),
            start_time: Instant::now(),
        })
    }

    /// State with the default layout for the dataset
    pub fn from_dataset(dataset: Dataset, load_report: LoadReport) -> ApiResult<Self> {
        let layout = Layout::for_dataset(&dataset);
        Self::new(Arc::new(dataset), load_report, layout)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
