use tracing::debug;

use super::{HourlyRecord, SeriesGenerator, SeriesKind, round_to};
use crate::calendar::{HOURS_PER_DAY, HourClock, days_in_month, hours_in_year};
use crate::error::{Error, Result};
use crate::noise::{NoiseRange, NoiseSource};
use crate::profile::{HOUSEHOLD_MONTHLY_KWH, HOUSEHOLD_PROFILE, HourlyProfile, MonthlyAverages};

/// Generates hourly household consumption from monthly totals.
///
/// Each month's total is spread evenly over its days and hours, shaped by a
/// profile normalised to average 1.0, then scaled by a per-day variance and a
/// per-hour noise factor.
///
/// # Examples
///
/// ```
/// use grid_mockdata::noise::FixedNoise;
/// use grid_mockdata::series::{HouseholdConsumption, SeriesGenerator};
///
/// let generator = HouseholdConsumption::default();
/// let rows = generator.generate(2024, &mut FixedNoise::default()).unwrap();
/// assert_eq!(rows.len(), 8784);
/// ```
#[derive(Debug, Clone)]
pub struct HouseholdConsumption {
    /// Total consumption of each month in kWh
    pub monthly_kwh: MonthlyAverages,

    /// Per-day multiplier, drawn once at midnight
    pub daily_variance: NoiseRange,

    /// Per-hour multiplier
    pub hourly_noise: NoiseRange,

    /// Load shape, normalised so it sums to 24
    profile: HourlyProfile,
}

impl HouseholdConsumption {
    /// Creates a generator, normalising `profile` to a mean of 1.0.
    ///
    /// # Arguments
    ///
    /// * `monthly_kwh` - Total consumption of each month in kWh
    /// * `profile` - Relative load of each hour of the day, any scale
    /// * `daily_variance` - Bounds of the per-day multiplier
    /// * `hourly_noise` - Bounds of the per-hour multiplier
    pub fn new(
        monthly_kwh: MonthlyAverages,
        profile: HourlyProfile,
        daily_variance: NoiseRange,
        hourly_noise: NoiseRange,
    ) -> Self {
        Self {
            monthly_kwh,
            daily_variance,
            hourly_noise,
            profile: profile.normalized(),
        }
    }

    /// The normalised load shape in use.
    pub fn profile(&self) -> &HourlyProfile {
        &self.profile
    }

    /// Average hourly consumption of `month` before shaping and noise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Calendar`] for a month outside 1-12 or a year chrono
    /// cannot represent.
    pub fn hourly_base(&self, year: i32, month: u32) -> Result<f64> {
        let days = days_in_month(year, month).ok_or(Error::Calendar { year, month })?;
        let total = self
            .monthly_kwh
            .get(month)
            .ok_or(Error::Calendar { year, month })?;
        let daily = total / f64::from(days);
        Ok(daily / f64::from(HOURS_PER_DAY))
    }
}

impl Default for HouseholdConsumption {
    fn default() -> Self {
        Self::new(
            HOUSEHOLD_MONTHLY_KWH,
            HOUSEHOLD_PROFILE,
            NoiseRange::new(0.9, 1.1),
            NoiseRange::new(0.95, 1.05),
        )
    }
}

impl SeriesGenerator for HouseholdConsumption {
    fn kind(&self) -> SeriesKind {
        SeriesKind::Household
    }

    fn generate(&self, year: i32, noise: &mut dyn NoiseSource) -> Result<Vec<HourlyRecord>> {
        let mut clock = HourClock::new(year)?;
        let mut records = Vec::with_capacity(hours_in_year(year)?);
        let decimals = self.kind().decimals();

        let mut hourly_base = 0.0;
        let mut daily_variance = 1.0;
        while let Some(slot) = clock.tick() {
            if slot.starts_month() {
                hourly_base = self.hourly_base(year, slot.month)?;
                debug!(month = slot.month, hourly_base, "household month baseline");
            }
            if slot.starts_day() {
                daily_variance = self.daily_variance.draw(noise);
            }

            let profile_factor = self.profile.0[slot.hour as usize];
            let hourly_noise = self.hourly_noise.draw(noise);
            let consumption = hourly_base * profile_factor * daily_variance * hourly_noise;

            records.push(HourlyRecord {
                month: slot.month,
                day: slot.day,
                hour: slot.hour,
                value: round_to(consumption, decimals),
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{FixedNoise, SeededNoise};
    use approx::assert_abs_diff_eq;

    fn flat_rows() -> Vec<HourlyRecord> {
        HouseholdConsumption::default()
            .generate(2024, &mut FixedNoise::default())
            .expect("2024 is a valid year")
    }

    #[test]
    fn august_eight_am_without_noise() {
        let generator = HouseholdConsumption::default();
        let rows = flat_rows();
        let row = rows
            .iter()
            .find(|r| r.month == 8 && r.day == 15 && r.hour == 8)
            .copied();
        let expected = round_to(363.0 / 31.0 / 24.0 * generator.profile().0[8], 4);
        assert_eq!(row.map(|r| r.value), Some(expected));
        assert_abs_diff_eq!(expected, 0.5311, epsilon = 1e-4);
    }

    #[test]
    fn flat_month_sums_to_monthly_total() {
        let rows = flat_rows();
        let august: f64 = rows.iter().filter(|r| r.month == 8).map(|r| r.value).sum();
        // Rounding to 4 places per row drifts the total by at most 744 * 5e-5.
        assert_abs_diff_eq!(august, 363.0, epsilon = 0.04);
    }

    #[test]
    fn rows_per_month_follow_calendar() {
        let rows = flat_rows();
        for month in 1..=12 {
            let n = rows.iter().filter(|r| r.month == month).count();
            let days = days_in_month(2024, month).expect("valid month") as usize;
            assert_eq!(n, days * 24, "month {month}");
        }
    }

    #[test]
    fn noisy_values_stay_within_bounds() {
        let generator = HouseholdConsumption::default();
        let rows = generator
            .generate(2024, &mut SeededNoise::new(42))
            .expect("valid year");
        for r in &rows {
            let base = generator.hourly_base(2024, r.month).expect("valid month")
                * generator.profile().0[r.hour as usize];
            assert!(
                r.value >= base * 0.9 * 0.95 - 1e-4 && r.value <= base * 1.1 * 1.05 + 1e-4,
                "{r:?} outside noise envelope of {base}"
            );
        }
    }

    #[test]
    fn daily_variance_is_shared_within_a_day() {
        let generator = HouseholdConsumption::new(
            HOUSEHOLD_MONTHLY_KWH,
            HourlyProfile([1.0; 24]),
            NoiseRange::new(0.9, 1.1),
            NoiseRange::unit(),
        );
        let rows = generator
            .generate(2024, &mut SeededNoise::new(5))
            .expect("valid year");
        for day in rows.chunks(24) {
            assert!(day.iter().all(|r| r.value == day[0].value));
        }
    }

    #[test]
    fn bad_month_is_rejected() {
        let generator = HouseholdConsumption::default();
        assert!(matches!(
            generator.hourly_base(2024, 13),
            Err(Error::Calendar { month: 13, .. })
        ));
    }
}
