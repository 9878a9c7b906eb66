//! Report rendering: console text, JSON and SVG plots.

pub mod json;
pub mod plots;
pub mod text;
