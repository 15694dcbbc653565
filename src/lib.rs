//! Synthetic hourly household consumption and system marginal price series.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
/// CSV export and import of generated series.
pub mod io;
pub mod noise;
pub mod profile;
pub mod runner;
/// Series generators and the hourly lookup table.
pub mod series;
pub mod summary;

pub use error::{Error, Result};
