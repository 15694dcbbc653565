//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;

use grid_mockdata::config::GeneratorConfig;
use grid_mockdata::noise::{FixedNoise, SeededNoise};
use grid_mockdata::series::{HourlyRecord, HouseholdConsumption, MarketPrice, SeriesGenerator};

/// Year of the reference tables (leap year, 8784 hours).
pub const YEAR: i32 = 2024;

/// Household series with every multiplier pinned to 1.0.
pub fn flat_household() -> Vec<HourlyRecord> {
    HouseholdConsumption::default()
        .generate(YEAR, &mut FixedNoise::default())
        .expect("reference year expands")
}

/// Price series with every multiplier pinned to 1.0.
pub fn flat_price() -> Vec<HourlyRecord> {
    MarketPrice::default()
        .generate(YEAR, &mut FixedNoise::default())
        .expect("reference year expands")
}

/// Household series drawn from a seeded RNG.
pub fn seeded_household(seed: u64) -> Vec<HourlyRecord> {
    HouseholdConsumption::default()
        .generate(YEAR, &mut SeededNoise::new(seed))
        .expect("reference year expands")
}

/// Price series drawn from a seeded RNG.
pub fn seeded_price(seed: u64) -> Vec<HourlyRecord> {
    MarketPrice::default()
        .generate(YEAR, &mut SeededNoise::new(seed))
        .expect("reference year expands")
}

/// Default config with seed 42 and both outputs redirected under `dir`.
pub fn config_in(dir: &Path) -> GeneratorConfig {
    let mut cfg = GeneratorConfig::korea_2024();
    cfg.general.seed = Some(42);
    cfg.household.output = dir.join("public").join("household_consumption.csv");
    cfg.price.output = dir.join("smp_data.csv");
    cfg
}
