use tracing::debug;

use super::{HourlyRecord, SeriesGenerator, SeriesKind, round_to};
use crate::calendar::{HourClock, hours_in_year};
use crate::error::{Error, Result};
use crate::noise::{NoiseRange, NoiseSource};
use crate::profile::{HourlyProfile, MonthlyAverages, SMP_MONTHLY_AVERAGES, SMP_PROFILE};

/// Generates hourly system marginal prices around monthly averages.
///
/// Unlike consumption, the monthly value is already a per-hour price level:
/// each day draws a base around it and each hour scales the base by the raw,
/// unnormalised profile and a small noise factor.
#[derive(Debug, Clone)]
pub struct MarketPrice {
    /// Average price of each month
    pub monthly_prices: MonthlyAverages,

    /// Hourly price shape, used as-is
    pub profile: HourlyProfile,

    /// Per-day multiplier on the monthly average
    pub daily_variance: NoiseRange,

    /// Per-hour multiplier
    pub hourly_noise: NoiseRange,
}

impl MarketPrice {
    pub fn new(
        monthly_prices: MonthlyAverages,
        profile: HourlyProfile,
        daily_variance: NoiseRange,
        hourly_noise: NoiseRange,
    ) -> Self {
        Self {
            monthly_prices,
            profile,
            daily_variance,
            hourly_noise,
        }
    }
}

impl Default for MarketPrice {
    fn default() -> Self {
        Self::new(
            SMP_MONTHLY_AVERAGES,
            SMP_PROFILE,
            NoiseRange::new(0.95, 1.05),
            NoiseRange::new(0.98, 1.02),
        )
    }
}

impl SeriesGenerator for MarketPrice {
    fn kind(&self) -> SeriesKind {
        SeriesKind::Price
    }

    fn generate(&self, year: i32, noise: &mut dyn NoiseSource) -> Result<Vec<HourlyRecord>> {
        let mut clock = HourClock::new(year)?;
        let mut records = Vec::with_capacity(hours_in_year(year)?);
        let decimals = self.kind().decimals();

        let mut avg_price = 0.0;
        let mut daily_base = 0.0;
        while let Some(slot) = clock.tick() {
            if slot.starts_month() {
                avg_price = self
                    .monthly_prices
                    .get(slot.month)
                    .ok_or(Error::Calendar {
                        year,
                        month: slot.month,
                    })?;
                debug!(month = slot.month, avg_price, "price month baseline");
            }
            if slot.starts_day() {
                daily_base = avg_price * self.daily_variance.draw(noise);
            }

            let profile_factor = self.profile.0[slot.hour as usize];
            let hourly_noise = self.hourly_noise.draw(noise);
            let price = daily_base * profile_factor * hourly_noise;

            records.push(HourlyRecord {
                month: slot.month,
                day: slot.day,
                hour: slot.hour,
                value: round_to(price, decimals),
            });
        }

        Ok(records)
    }
}
