//! # adapter_loader: CSV input for the analysis pipeline
//!
//! Reads a CSV file with a header row, picks the date and value columns by
//! name, parses each row into an [`Observation`](eva_core::types::Observation)
//! and hands the result to
//! [`DailySeries::from_observations`](eva_core::types::DailySeries::from_observations)
//! for sorting and gap filling.
//!
//! ```rust
//! use adapter_loader::{CsvLoader, LoaderConfig};
//!
//! let data = "Date,Fatalities,Region\n03/01/2024,12,North\n01/01/2024,5,South\n";
//! let series = CsvLoader::new(LoaderConfig::default())
//!     .load_reader(data.as_bytes())
//!     .unwrap();
//!
//! assert_eq!(series.values(), &[5.0, 0.0, 12.0]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod csv_loader;
pub mod error;

pub use csv_loader::{CsvLoader, LoaderConfig};
pub use error::LoaderError;
