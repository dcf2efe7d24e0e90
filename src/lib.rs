//! # Wildfire Dashboard
//!
//! Interactive dashboard of Australian wildfire statistics by region, year
//! and month.
//!
//! ## Modules
//!
//! - [`dataset`]: CSV loading and the immutable in-memory table
//! - [`charts`]: chart specifications and the selection handler
//! - [`layout`]: the dashboard control tree and its HTML rendering
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wildfire_dashboard::charts::SelectionHandler;
//! use wildfire_dashboard::dataset::{DatasetLoader, Region};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (dataset, report) = DatasetLoader::new().load("Historical_Wildfires.csv").await?;
//!     println!("Loaded {} rows ({} skipped)", report.rows_loaded, report.rows_skipped);
//!
//!     let handler = SelectionHandler::new(Arc::new(dataset));
//!     let (area, count) = handler.handle(Region::NSW, 2005);
//!
//!     println!("{}: {:?}", area.title, area.categories);
//!     println!("{}: {:?}", count.title, count.values);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod dataset;
pub mod layout;
pub mod logging;

pub use api::{build_router, serve, ApiError, AppState};

pub use charts::{ChartKind, ChartSpec, SelectionHandler};

pub use config::{Config, ConfigError, DashboardConfig, DatasetConfig, LoggingConfig, ServerConfig};

pub use dataset::{Dataset, DatasetError, DatasetLoader, LoadReport, Region, WildfireRecord};

pub use layout::{Layout, LayoutBuilder, Node};
