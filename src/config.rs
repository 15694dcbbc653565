//! TOML-based generator configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::noise::NoiseRange;
use crate::profile::{
    HOUSEHOLD_MONTHLY_KWH, HOUSEHOLD_PROFILE, HourlyProfile, MonthlyAverages,
    SMP_MONTHLY_AVERAGES, SMP_PROFILE,
};
use crate::series::{HouseholdConsumption, MarketPrice};

/// Top-level configuration parsed from TOML.
///
/// All fields have defaults matching the `korea_2024` preset. Load from
/// TOML with [`GeneratorConfig::from_toml_file`] or use
/// [`GeneratorConfig::korea_2024`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Calendar year and random seed.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Household consumption series.
    #[serde(default)]
    pub household: HouseholdConfig,
    /// System marginal price series.
    #[serde(default)]
    pub price: PriceConfig,
}

/// Parameters shared by every series.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Calendar year to expand (leap years give 8784 rows).
    pub year: i32,
    /// Master random seed; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            year: 2024,
            seed: None,
        }
    }
}

/// Household consumption series parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseholdConfig {
    pub enabled: bool,
    /// Output CSV path.
    pub output: PathBuf,
    /// Create missing parent directories of `output`.
    pub create_parent_dirs: bool,
    /// Total consumption per month (kWh), January first.
    pub monthly_averages: MonthlyAverages,
    /// Hourly load shape; normalised to a mean of 1.0 before use.
    pub profile: HourlyProfile,
    pub daily_variance: NoiseRange,
    pub hourly_noise: NoiseRange,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output: PathBuf::from("public/household_consumption.csv"),
            create_parent_dirs: true,
            monthly_averages: HOUSEHOLD_MONTHLY_KWH,
            profile: HOUSEHOLD_PROFILE,
            daily_variance: NoiseRange::new(0.9, 1.1),
            hourly_noise: NoiseRange::new(0.95, 1.05),
        }
    }
}

impl HouseholdConfig {
    pub fn generator(&self) -> HouseholdConsumption {
        HouseholdConsumption::new(
            self.monthly_averages,
            self.profile,
            self.daily_variance,
            self.hourly_noise,
        )
    }
}

/// System marginal price series parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriceConfig {
    pub enabled: bool,
    /// Output CSV path.
    pub output: PathBuf,
    /// Create missing parent directories of `output`.
    pub create_parent_dirs: bool,
    /// Average price per month, January first.
    pub monthly_averages: MonthlyAverages,
    /// Hourly price shape, applied unnormalised.
    pub profile: HourlyProfile,
    pub daily_variance: NoiseRange,
    pub hourly_noise: NoiseRange,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output: PathBuf::from("smp_data.csv"),
            create_parent_dirs: false,
            monthly_averages: SMP_MONTHLY_AVERAGES,
            profile: SMP_PROFILE,
            daily_variance: NoiseRange::new(0.95, 1.05),
            hourly_noise: NoiseRange::new(0.98, 1.02),
        }
    }
}

impl PriceConfig {
    pub fn generator(&self) -> MarketPrice {
        MarketPrice::new(
            self.monthly_averages,
            self.profile,
            self.daily_variance,
            self.hourly_noise,
        )
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"household.daily_variance"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl GeneratorConfig {
    /// Returns the 2024 South Korean household and mainland SMP tables.
    pub fn korea_2024() -> Self {
        Self::default()
    }

    /// Returns the noise-free preset: defaults with every multiplier pinned to 1.0.
    pub fn flat() -> Self {
        let mut cfg = Self::default();
        cfg.household.daily_variance = NoiseRange::unit();
        cfg.household.hourly_noise = NoiseRange::unit();
        cfg.price.daily_variance = NoiseRange::unit();
        cfg.price.hourly_noise = NoiseRange::unit();
        cfg
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["korea_2024", "flat"];

    /// Loads a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "korea_2024" => Ok(Self::korea_2024()),
            "flat" => Ok(Self::flat()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid, has unknown fields, or
    /// a table has the wrong number of entries.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let year = self.general.year;
        if !(1..=9999).contains(&year) {
            errors.push(ConfigError::new(
                "general.year",
                format!("must be in 1..=9999, got {year}"),
            ));
        }

        let h = &self.household;
        check_table(&mut errors, "household.monthly_averages", &h.monthly_averages.0);
        check_table(&mut errors, "household.profile", &h.profile.0);
        if h.profile.sum() <= 0.0 {
            errors.push(ConfigError::new(
                "household.profile",
                "must have a positive sum to normalise",
            ));
        }
        check_range(&mut errors, "household.daily_variance", h.daily_variance);
        check_range(&mut errors, "household.hourly_noise", h.hourly_noise);

        let p = &self.price;
        check_table(&mut errors, "price.monthly_averages", &p.monthly_averages.0);
        check_table(&mut errors, "price.profile", &p.profile.0);
        check_range(&mut errors, "price.daily_variance", p.daily_variance);
        check_range(&mut errors, "price.hourly_noise", p.hourly_noise);

        if !h.enabled && !p.enabled {
            errors.push(ConfigError::new(
                "household.enabled",
                "at least one of household or price must be enabled",
            ));
        }
        if h.enabled && p.enabled && h.output == p.output {
            errors.push(ConfigError::new(
                "price.output",
                format!("must differ from household.output (\"{}\")", h.output.display()),
            ));
        }

        errors
    }
}

fn check_table(errors: &mut Vec<ConfigError>, field: &str, values: &[f64]) {
    if let Some((i, v)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        errors.push(ConfigError::new(
            field,
            format!("entry {i} must be finite and >= 0, got {v}"),
        ));
    }
}

fn check_range(errors: &mut Vec<ConfigError>, field: &str, range: NoiseRange) {
    if !range.min.is_finite() || !range.max.is_finite() || range.min <= 0.0 {
        errors.push(ConfigError::new(
            field,
            format!("bounds must be finite and > 0, got {}..{}", range.min, range.max),
        ));
    } else if range.min > range.max {
        errors.push(ConfigError::new(
            field,
            format!("min must be <= max, got {}..{}", range.min, range.max),
        ));
    }
}
