//! CSV export and import of hourly series.

/// Writing generated series to CSV.
pub mod export;
/// Reading generated series back from CSV.
pub mod import;
