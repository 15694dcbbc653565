use crate::calendar::{HourClock, HourSlot};
use crate::error::{Error, Result};
use crate::series::{HourlyRecord, SeriesKind};

/// A validated full-year series indexed by calendar hour.
///
/// A consumer stepping through the year hour by hour can look up the value
/// for any `(month, day, hour)` in constant time.
#[derive(Debug, Clone)]
pub struct HourlySeries {
    kind: SeriesKind,
    year: i32,
    records: Vec<HourlyRecord>,
}

impl HourlySeries {
    /// Wraps `records` after checking them against the calendar of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Series`] on the first row that is out of order,
    /// missing, extra or non-finite.
    pub fn new(kind: SeriesKind, year: i32, records: Vec<HourlyRecord>) -> Result<Self> {
        validate(year, &records)?;
        Ok(Self {
            kind,
            year,
            records,
        })
    }

    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn records(&self) -> &[HourlyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value at the given calendar hour, or `None` if it is not in the year.
    pub fn value_at(&self, month: u32, day: u32, hour: u32) -> Option<f64> {
        if hour >= 24 {
            return None;
        }
        let slot = HourSlot { month, day, hour };
        let idx = slot.ordinal(self.year)?;
        self.records.get(idx).map(|r| r.value)
    }
}

/// Checks that `records` hold exactly one finite value per hour of `year`,
/// in month, day, hour order.
///
/// # Errors
///
/// Returns [`Error::Series`] naming the first offending data row (1-based),
/// or [`Error::Calendar`] if the year cannot be expanded.
pub fn validate(year: i32, records: &[HourlyRecord]) -> Result<()> {
    let mut clock = HourClock::new(year)?;
    for (i, r) in records.iter().enumerate() {
        let row = i + 1;
        let Some(slot) = clock.tick() else {
            return Err(Error::Series {
                row,
                message: format!("extra row past the end of {year}"),
            });
        };
        if (r.month, r.day, r.hour) != (slot.month, slot.day, slot.hour) {
            return Err(Error::Series {
                row,
                message: format!(
                    "expected {}/{} {:02}h, found {}/{} {:02}h",
                    slot.month, slot.day, slot.hour, r.month, r.day, r.hour
                ),
            });
        }
        if !r.value.is_finite() {
            return Err(Error::Series {
                row,
                message: format!("non-finite value {}", r.value),
            });
        }
    }
    if let Some(slot) = clock.tick() {
        return Err(Error::Series {
            row: records.len() + 1,
            message: format!(
                "series ends early, missing {}/{} {:02}h onwards",
                slot.month, slot.day, slot.hour
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_year(year: i32) -> Vec<HourlyRecord> {
        HourClock::new(year)
            .into_iter()
            .flatten()
            .enumerate()
            .map(|(i, s)| HourlyRecord {
                month: s.month,
                day: s.day,
                hour: s.hour,
                value: i as f64,
            })
            .collect()
    }

    #[test]
    fn lookup_by_calendar_hour() {
        let series = HourlySeries::new(SeriesKind::Price, 2024, full_year(2024)).expect("valid");
        assert_eq!(series.len(), 8784);
        assert_eq!(series.value_at(1, 1, 0), Some(0.0));
        assert_eq!(series.value_at(1, 2, 5), Some(29.0));
        assert_eq!(series.value_at(12, 31, 23), Some(8783.0));
        assert_eq!(series.value_at(2, 30, 0), None);
        assert_eq!(series.value_at(3, 1, 24), None);
    }

    #[test]
    fn short_series_is_rejected() {
        let mut rows = full_year(2024);
        rows.pop();
        let err = validate(2024, &rows);
        assert!(matches!(err, Err(Error::Series { row: 8784, .. })));
    }

    #[test]
    fn wrong_year_is_rejected() {
        // 2023 has no Feb 29th, so 2024 rows drift out of order there.
        let err = validate(2023, &full_year(2024));
        assert!(matches!(err, Err(Error::Series { .. })));
    }

    #[test]
    fn swapped_rows_are_rejected() {
        let mut rows = full_year(2025);
        rows.swap(10, 11);
        let err = validate(2025, &rows);
        assert!(matches!(err, Err(Error::Series { row: 11, .. })));
    }

    #[test]
    fn nan_is_rejected() {
        let mut rows = full_year(2025);
        rows[100].value = f64::NAN;
        assert!(matches!(
            validate(2025, &rows),
            Err(Error::Series { row: 101, .. })
        ));
    }
}
