//! CSV reader for dated count series.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use eva_core::types::time::DAY_MONTH_YEAR;
use eva_core::types::{DailySeries, Date, DuplicatePolicy, Observation};
use serde::{Deserialize, Serialize};

use crate::error::LoaderError;

/// Column names, date format and duplicate handling for the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Header of the date column
    pub date_column: String,
    /// Header of the count column
    pub value_column: String,
    /// chrono format of the date cells
    pub date_format: String,
    /// What to do with repeated dates
    pub duplicates: DuplicatePolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            date_column: "Date".to_string(),
            value_column: "Fatalities".to_string(),
            date_format: DAY_MONTH_YEAR.to_string(),
            duplicates: DuplicatePolicy::Reject,
        }
    }
}

/// Loads a [`DailySeries`] from CSV.
///
/// Columns other than the configured date and value columns are ignored.
/// Rows may appear in any order; the series is sorted and gap-filled with
/// zeros between the first and last date.
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    config: LoaderConfig,
}

impl CsvLoader {
    /// Creates a loader with the given configuration.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// The loader configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Reads and gap-fills the file at `path`.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<DailySeries, LoaderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LoaderError::io(path.display().to_string(), e))?;
        let series = self.load_reader(file)?;

        tracing::info!(
            path = %path.display(),
            days = series.len(),
            start = %series.start(),
            end = %series.end(),
            "Loaded daily series"
        );
        Ok(series)
    }

    /// Reads and gap-fills CSV text from any reader.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<DailySeries, LoaderError> {
        let observations = self.read_observations(reader)?;
        let series = DailySeries::from_observations(&observations, self.config.duplicates)?;

        tracing::debug!(
            observations = observations.len(),
            filled = series.len().saturating_sub(observations.len()),
            "Gap-filled missing days with zero"
        );
        Ok(series)
    }

    /// Parses every data row into an [`Observation`], in file order.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed row; line numbers count the header as
    /// line 1.
    pub fn read_observations<R: Read>(&self, reader: R) -> Result<Vec<Observation>, LoaderError> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        let date_idx = column_index(&headers, &self.config.date_column)?;
        let value_idx = column_index(&headers, &self.config.value_column)?;

        let mut observations = Vec::new();
        for record in csv.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let raw_date = record.get(date_idx).unwrap_or_default();
            let raw_value = record.get(value_idx).unwrap_or_default();

            let date = Date::parse_with_format(raw_date, &self.config.date_format).map_err(|_| {
                LoaderError::DateParse {
                    line,
                    raw: raw_date.to_string(),
                    format: self.config.date_format.clone(),
                }
            })?;
            let value = parse_count(raw_value).ok_or_else(|| LoaderError::InvalidValue {
                line,
                raw: raw_value.to_string(),
            })?;

            observations.push(Observation::new(date, value));
        }

        if observations.is_empty() {
            return Err(LoaderError::Empty);
        }
        Ok(observations)
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, LoaderError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LoaderError::MissingColumn {
            column: name.to_string(),
            available: headers.iter().map(str::to_string).collect(),
        })
}

fn parse_count(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
