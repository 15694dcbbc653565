//! Hourly series generators.

/// Household electricity consumption generator.
pub mod household;
pub mod lookup;
/// System marginal price generator.
pub mod price;

use std::fmt;

use crate::error::Result;
use crate::noise::NoiseSource;

pub use household::HouseholdConsumption;
pub use lookup::HourlySeries;
pub use price::MarketPrice;

/// One output row: the value of a series at a given hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyRecord {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub value: f64,
}

/// Which series a file holds; fixes its value column and precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Household,
    Price,
}

impl SeriesKind {
    pub const ALL: [Self; 2] = [Self::Household, Self::Price];

    /// Header of the value column.
    pub fn value_column(self) -> &'static str {
        match self {
            Self::Household => "Consumption_kWh",
            Self::Price => "SMP",
        }
    }

    /// Full CSV header row.
    pub fn header(self) -> [&'static str; 4] {
        ["Month", "Day", "Hour", self.value_column()]
    }

    /// Decimal places values are rounded and printed to.
    pub fn decimals(self) -> usize {
        match self {
            Self::Household => 4,
            Self::Price => 2,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Household => "kWh",
            Self::Price => "/MWh",
        }
    }

    /// Parses the short name used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "household" => Some(Self::Household),
            "price" | "smp" => Some(Self::Price),
            _ => None,
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Household => write!(f, "household"),
            Self::Price => write!(f, "price"),
        }
    }
}

/// A generator that expands monthly baselines into an hourly series for a year.
///
/// Rows come out month-major, then day, then hour, one per hour of `year`.
pub trait SeriesGenerator {
    fn kind(&self) -> SeriesKind;

    /// Generates the full-year series, drawing every multiplier from `noise`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Calendar`] when `year` cannot be expanded.
    fn generate(&self, year: i32, noise: &mut dyn NoiseSource) -> Result<Vec<HourlyRecord>>;
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    (value * scale).round() / scale
}
