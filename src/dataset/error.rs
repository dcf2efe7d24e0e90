//! Dataset error types
//!
//! Errors returned while fetching and parsing the wildfire CSV.

use thiserror::Error;

/// Errors that can occur while loading the dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Remote source could not be fetched
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote source answered with a non-success status
    #[error("Failed to fetch {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Local source could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV structure could not be read (header row, encoding)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// No row of the source could be parsed
    #[error("Dataset is empty: no valid rows in {0}")]
    Empty(String),

    /// Field value could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Region code outside the seven known codes
    #[error("Unknown region code: {0}")]
    UnknownRegion(String),
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DatasetError::MissingColumn("Date");
        assert_eq!(err.to_string(), "Missing required column: Date");

        let err = DatasetError::UnknownRegion("ACT".to_string());
        assert_eq!(err.to_string(), "Unknown region code: ACT");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DatasetError = io_err.into();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
