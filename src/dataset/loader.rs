//! Dataset Loader
//!
//! Fetches the wildfire CSV from an HTTP(S) URL or a local path and turns it
//! into a [`Dataset`]. Rows that cannot be parsed are skipped and reported;
//! structural problems (unreachable source, missing columns, no valid rows)
//! are fatal.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::path::Path;
use std::time::Duration;

use super::error::{DatasetError, DatasetResult};
use super::types::{Dataset, Region, WildfireRecord};

const DATE_COLUMN: &str = "Date";
const REGION_COLUMN: &str = "Region";
const AREA_COLUMN: &str = "Estimated_fire_area";
const COUNT_COLUMN: &str = "Count";

/// Maximum number of row errors kept in a [`LoadReport`]
const MAX_REPORTED_ERRORS: usize = 100;

/// Summary of a dataset load
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub source: String,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
    pub errors: Vec<String>,
}

/// Loads the wildfire dataset from a URI
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    fetch_timeout: Duration,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Column positions resolved from the header row
struct Columns {
    date: usize,
    region: usize,
    area: usize,
    count: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> DatasetResult<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(DatasetError::MissingColumn(name))
        };

        Ok(Self {
            date: find(DATE_COLUMN)?,
            region: find(REGION_COLUMN)?,
            area: find(AREA_COLUMN)?,
            count: find(COUNT_COLUMN)?,
        })
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(30),
        }
    }

    /// Set the timeout for remote fetches
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Load the dataset from an `http(s)://` URL, a `file://` URI or a plain path
    pub async fn load(&self, uri: &str) -> DatasetResult<(Dataset, LoadReport)> {
        tracing::info!(source = %uri, "Loading wildfire dataset");

        let bytes = if uri.starts_with("http://") || uri.starts_with("https://") {
            self.fetch(uri).await?
        } else {
            let path = uri.strip_prefix("file://").unwrap_or(uri);
            tokio::fs::read(Path::new(path)).await?
        };

        let (dataset, mut report) = parse_bytes(&bytes)?;
        report.source = uri.to_string();

        tracing::info!(
            source = %uri,
            rows_loaded = report.rows_loaded,
            rows_skipped = report.rows_skipped,
            years = dataset.years().len(),
            "Dataset loaded"
        );

        Ok((dataset, report))
    }

    async fn fetch(&self, url: &str) -> DatasetResult<Vec<u8>> {
        let client = reqwest::Client::builder()
            .timeout(self.fetch_timeout)
            .build()?;

        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DatasetError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!(bytes = body.len(), "Fetched dataset");
        Ok(body.to_vec())
    }
}

/// Parse CSV text into a dataset
pub fn parse_str(csv_data: &str) -> DatasetResult<(Dataset, LoadReport)> {
    parse_bytes(csv_data.as_bytes())
}

/// Parse CSV bytes into a dataset, skipping malformed rows
pub fn parse_bytes(bytes: &[u8]) -> DatasetResult<(Dataset, LoadReport)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns = Columns::resolve(reader.headers()?)?;

    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for (line_num, result) in reader.records().enumerate() {
        // Header is line 1
        let line = line_num + 2;

        let parsed = result
            .map_err(DatasetError::from)
            .and_then(|row| parse_row(&row, &columns));

        match parsed {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(line, error = %e, "Skipping malformed row");
                report.rows_skipped += 1;
                report.errors.push(format!("Line {}: {}", line, e));
            }
        }
    }

    if report.errors.len() > MAX_REPORTED_ERRORS {
        let total = report.errors.len();
        report.errors.truncate(MAX_REPORTED_ERRORS);
        report
            .errors
            .push(format!("... and {} more errors", total - MAX_REPORTED_ERRORS));
    }

    if records.is_empty() {
        return Err(DatasetError::Empty(format!(
            "0 valid rows, {} skipped",
            report.rows_skipped
        )));
    }

    report.rows_loaded = records.len();
    Ok((Dataset::new(records), report))
}

fn parse_row(row: &csv::StringRecord, columns: &Columns) -> DatasetResult<WildfireRecord> {
    let field = |idx: usize, name: &str| {
        row.get(idx)
            .map(str::trim)
            .ok_or_else(|| DatasetError::Parse(format!("missing {} field", name)))
    };

    let date = parse_date(field(columns.date, DATE_COLUMN)?)?;
    let region: Region = field(columns.region, REGION_COLUMN)?.parse()?;

    let area_str = field(columns.area, AREA_COLUMN)?;
    let estimated_fire_area: f64 = area_str
        .parse()
        .map_err(|_| DatasetError::Parse(format!("invalid {}: {:?}", AREA_COLUMN, area_str)))?;
    if !estimated_fire_area.is_finite() {
        return Err(DatasetError::Parse(format!(
            "invalid {}: {:?}",
            AREA_COLUMN, area_str
        )));
    }

    let count = parse_count(field(columns.count, COUNT_COLUMN)?)?;

    Ok(WildfireRecord::new(date, region, estimated_fire_area, count))
}

/// Parse a pixel count, accepting integral floats such as "12.0"
fn parse_count(s: &str) -> DatasetResult<u64> {
    if let Ok(count) = s.parse::<u64>() {
        return Ok(count);
    }

    match s.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => Ok(v as u64),
        _ => Err(DatasetError::Parse(format!(
            "invalid {}: {:?}",
            COUNT_COLUMN, s
        ))),
    }
}

/// Parse a calendar date in any of the accepted formats
pub fn parse_date(s: &str) -> DatasetResult<NaiveDate> {
    const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d"];
    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    Err(DatasetError::Parse(format!("could not parse date: {:?}", s)))
}
