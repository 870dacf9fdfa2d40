//! Input discovery module
//!
//! Finds the input files of a run and the period identifier embedded in
//! each file name (`2024-01-Verbrauch.json` -> `2024-01`).

mod scanner;

pub use scanner::{discover, extract_period, DiscoveredFile, InputFiles};

#[cfg(test)]
mod tests;
