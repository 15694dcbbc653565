//! Monthly baseline tables and 24-hour shape curves.

use serde::Deserialize;

use crate::calendar::HOURS_PER_DAY;

/// One baseline value per calendar month, January first.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MonthlyAverages(pub [f64; 12]);

impl MonthlyAverages {
    /// Returns the value for `month` (1-12).
    pub fn get(&self, month: u32) -> Option<f64> {
        let idx = usize::try_from(month).ok()?.checked_sub(1)?;
        self.0.get(idx).copied()
    }
}

/// Relative weight of each hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct HourlyProfile(pub [f64; 24]);

impl HourlyProfile {
    /// Returns the multiplier for `hour` (0-23).
    pub fn factor(&self, hour: u32) -> Option<f64> {
        self.0.get(usize::try_from(hour).ok()?).copied()
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Rescales the curve so it sums to 24, i.e. averages 1.0 per hour.
    ///
    /// A curve that sums to zero is returned unchanged.
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if sum == 0.0 {
            return *self;
        }
        Self(self.0.map(|x| x / sum * f64::from(HOURS_PER_DAY)))
    }
}

/// Monthly household consumption in kWh (South Korea, 2024).
///
/// August peaks near 363 kWh; winter and mid-summer are the high seasons.
pub const HOUSEHOLD_MONTHLY_KWH: MonthlyAverages = MonthlyAverages([
    290.0, 285.0, 260.0, 255.0, 260.0, 280.0, 320.0, 363.0, 290.0, 255.0, 265.0, 295.0,
]);

/// Residential load shape before normalisation.
pub const HOUSEHOLD_PROFILE: HourlyProfile = HourlyProfile([
    0.60, 0.55, 0.50, 0.50, 0.55, 0.65, // night
    0.80, 1.10, 1.00, 0.90, 0.85, 0.85, // morning routine
    0.85, 0.85, 0.90, 0.95, 1.05, 1.20, // afternoon build-up
    1.35, 1.45, 1.40, 1.30, 1.10, 0.80, // evening peak
]);

/// Monthly average system marginal price (mainland, 2024).
pub const SMP_MONTHLY_AVERAGES: MonthlyAverages = MonthlyAverages([
    120.39, 118.46, 117.39, 117.40, 114.06, 112.90, 112.91, 101.16, 101.53, 101.53, 116.05,
    105.57,
]);

/// Peak/off-peak price shape, applied unnormalised.
pub const SMP_PROFILE: HourlyProfile = HourlyProfile([
    0.85, 0.80, 0.78, 0.78, 0.80, 0.85, // off-peak
    0.95, 1.05, 1.15, 1.20, 1.20, 1.15, // morning ramp
    1.10, 1.05, 1.05, 1.10, 1.20, 1.25, // afternoon dip, evening ramp
    1.25, 1.20, 1.15, 1.10, 1.00, 0.90, // evening peak
]);
