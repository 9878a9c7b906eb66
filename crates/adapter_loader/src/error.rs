//! Loader errors.

use eva_core::types::{Date, SeriesError};
use thiserror::Error;

/// Errors raised while reading an input file.
///
/// All of them are fatal: nothing is recovered or skipped.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The file could not be opened or read.
    #[error("Cannot read '{path}': {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV (bad quoting, uneven row lengths, invalid UTF-8).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing column '{column}' (found: {})", .available.join(", "))]
    MissingColumn {
        /// Column that was looked for
        column: String,
        /// Header names present in the file
        available: Vec<String>,
    },

    /// A date cell did not match the configured format.
    #[error("Line {line}: cannot parse date '{raw}' with format '{format}'")]
    DateParse {
        /// 1-based line number in the file
        line: u64,
        /// Raw cell text
        raw: String,
        /// Expected chrono format
        format: String,
    },

    /// A value cell was not a finite, non-negative number.
    #[error("Line {line}: invalid count '{raw}'")]
    InvalidValue {
        /// 1-based line number in the file
        line: u64,
        /// Raw cell text
        raw: String,
    },

    /// Two rows carry the same date and duplicates are rejected.
    #[error("Duplicate date {date}")]
    DuplicateDate {
        /// The repeated date
        date: Date,
    },

    /// The file has a header but no data rows.
    #[error("Input contains no data rows")]
    Empty,

    /// Any other failure while assembling the daily series.
    #[error(transparent)]
    Series(SeriesError),
}

impl LoaderError {
    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        LoaderError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<SeriesError> for LoaderError {
    fn from(err: SeriesError) -> Self {
        match err {
            SeriesError::Empty => LoaderError::Empty,
            SeriesError::DuplicateDate { date } => LoaderError::DuplicateDate { date },
            other => LoaderError::Series(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_lists_headers() {
        let err = LoaderError::MissingColumn {
            column: "Fatalities".to_string(),
            available: vec!["Date".to_string(), "Deaths".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing column 'Fatalities' (found: Date, Deaths)"
        );
    }

    #[test]
    fn test_series_errors_map_to_loader_variants() {
        let date = Date::from_ymd(2024, 1, 1).unwrap();
        assert!(matches!(
            LoaderError::from(SeriesError::Empty),
            LoaderError::Empty
        ));
        assert!(matches!(
            LoaderError::from(SeriesError::DuplicateDate { date }),
            LoaderError::DuplicateDate { .. }
        ));
        assert!(matches!(
            LoaderError::from(SeriesError::InvalidValue { date, value: -1.0 }),
            LoaderError::Series(_)
        ));
    }

    #[test]
    fn test_io_helper_keeps_path() {
        let err = LoaderError::io(
            "missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("missing.csv"));
    }
}
