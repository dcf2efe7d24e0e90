//! Wildfire dataset
//!
//! Loading and in-memory representation of the historical wildfire table.
//! The dataset is built once at startup and is read-only afterwards.

pub mod error;
pub mod loader;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use loader::{parse_bytes, parse_date, parse_str, DatasetLoader, LoadReport};
pub use types::{Dataset, Region, WildfireRecord};
