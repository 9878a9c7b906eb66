//! Extreme value extraction.
//!
//! - [`pot`]: Peaks-over-threshold selection with declustering

pub mod pot;

pub use pot::{
    extract_peaks_over_threshold, window_from_hours, Extreme, ExtremesSet, MAX_WINDOW_HOURS,
};
