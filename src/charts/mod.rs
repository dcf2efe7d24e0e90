//! Dashboard charts
//!
//! - [`spec`]: renderer-independent chart descriptions
//! - [`handler`]: the (region, year) → charts selection handler

pub mod handler;
pub mod spec;

pub use handler::{area_title, count_title, SelectionHandler};
pub use spec::{ChartKind, ChartSpec};
