//! Gregorian calendar expansion of a year into hourly slots.

use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};

/// Hours in one day; every series has a 24-entry profile.
pub const HOURS_PER_DAY: u32 = 24;

/// Returns the number of days in `month` (1-12) of `year`, or `None` if the
/// month does not exist or the year is outside chrono's supported range.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Returns the number of days in `year`.
///
/// # Errors
///
/// Returns [`Error::Calendar`] when chrono cannot represent the year.
pub fn days_in_year(year: i32) -> Result<u32> {
    (1..=12).try_fold(0, |acc, month| {
        days_in_month(year, month)
            .map(|d| acc + d)
            .ok_or(Error::Calendar { year, month })
    })
}

/// Returns the number of hourly rows a full-year series has.
///
/// # Errors
///
/// Returns [`Error::Calendar`] when chrono cannot represent the year.
pub fn hours_in_year(year: i32) -> Result<usize> {
    Ok(days_in_year(year)? as usize * HOURS_PER_DAY as usize)
}

/// One hour of the calendar, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourSlot {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl HourSlot {
    /// True on the first hour of a day, when per-day draws happen.
    pub fn starts_day(&self) -> bool {
        self.hour == 0
    }

    /// True on the first hour of a month.
    pub fn starts_month(&self) -> bool {
        self.day == 1 && self.hour == 0
    }

    /// Zero-based hour offset from January 1st 00:00 of `year`.
    pub fn ordinal(&self, year: i32) -> Option<usize> {
        let date = NaiveDate::from_ymd_opt(year, self.month, self.day)?;
        Some(date.ordinal0() as usize * HOURS_PER_DAY as usize + self.hour as usize)
    }
}

/// A clock that walks every hour of a year, month-major then day then hour.
///
/// # Examples
///
/// ```
/// use grid_mockdata::calendar::HourClock;
///
/// let mut clock = HourClock::new(2024).unwrap();
/// let first = clock.tick().unwrap();
/// assert_eq!((first.month, first.day, first.hour), (1, 1, 0));
/// assert_eq!(clock.count(), 8783);
/// ```
#[derive(Debug, Clone)]
pub struct HourClock {
    year: i32,
    /// Next slot to hand out, `None` once the year is exhausted.
    next: Option<HourSlot>,
    /// Day count of the month `next` lies in.
    days_in_month: u32,
}

impl HourClock {
    /// Creates a clock positioned at January 1st, 00:00.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Calendar`] when chrono cannot represent the year.
    pub fn new(year: i32) -> Result<Self> {
        days_in_year(year)?;
        let days_in_month = days_in_month(year, 1).ok_or(Error::Calendar { year, month: 1 })?;
        Ok(Self {
            year,
            next: Some(HourSlot {
                month: 1,
                day: 1,
                hour: 0,
            }),
            days_in_month,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the current slot and advances by one hour.
    ///
    /// Returns `None` once December 31st, 23:00 has been handed out.
    pub fn tick(&mut self) -> Option<HourSlot> {
        let slot = self.next?;
        self.next = self.advance(slot);
        Some(slot)
    }

    /// Runs `f` for every remaining slot.
    pub fn run(&mut self, mut f: impl FnMut(HourSlot)) {
        while let Some(slot) = self.tick() {
            f(slot);
        }
    }

    fn advance(&mut self, slot: HourSlot) -> Option<HourSlot> {
        if slot.hour + 1 < HOURS_PER_DAY {
            return Some(HourSlot {
                hour: slot.hour + 1,
                ..slot
            });
        }
        if slot.day < self.days_in_month {
            return Some(HourSlot {
                day: slot.day + 1,
                hour: 0,
                ..slot
            });
        }
        if slot.month == 12 {
            return None;
        }
        let month = slot.month + 1;
        // Validated for every month in `new`.
        self.days_in_month = days_in_month(self.year, month)?;
        Some(HourSlot {
            month,
            day: 1,
            hour: 0,
        })
    }
}

impl Iterator for HourClock {
    type Item = HourSlot;

    fn next(&mut self) -> Option<HourSlot> {
        self.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_leap_february() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(days_in_month(2024, 0), None);
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn test_hours_in_leap_year() {
        assert_eq!(days_in_year(2024).expect("valid year"), 366);
        assert_eq!(hours_in_year(2024).expect("valid year"), 8784);
        assert_eq!(hours_in_year(2025).expect("valid year"), 8760);
    }

    #[test]
    fn test_clock_boundaries() {
        let slots: Vec<HourSlot> = HourClock::new(2024).into_iter().flatten().collect();
        assert_eq!(slots.len(), 8784);
        assert_eq!(
            slots.last().copied(),
            Some(HourSlot {
                month: 12,
                day: 31,
                hour: 23
            })
        );
        // Feb 29th exists, Mar 1st follows it.
        let feb29 = slots
            .iter()
            .position(|s| s.month == 2 && s.day == 29 && s.hour == 23);
        assert!(feb29.is_some());
        let after = feb29.and_then(|i| slots.get(i + 1)).copied();
        assert_eq!(
            after,
            Some(HourSlot {
                month: 3,
                day: 1,
                hour: 0
            })
        );
    }

    #[test]
    fn test_run_after_exhaustion() {
        let mut clock = HourClock::new(2023).expect("valid year");
        let mut n = 0;
        clock.run(|_| n += 1);
        assert_eq!(n, 8760);
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn test_ordinal_matches_position() {
        let clock = HourClock::new(2024).expect("valid year");
        for (i, slot) in clock.enumerate() {
            assert_eq!(slot.ordinal(2024), Some(i));
        }
    }

    proptest! {
        #[test]
        fn clock_covers_every_hour(year in 1i32..=9999) {
            let clock = HourClock::new(year).expect("year in range");
            let mut count = 0usize;
            for slot in clock {
                prop_assert!((1..=12).contains(&slot.month));
                let days = days_in_month(year, slot.month).expect("valid month");
                prop_assert!(slot.day >= 1 && slot.day <= days);
                prop_assert!(slot.hour < HOURS_PER_DAY);
                count += 1;
            }
            prop_assert_eq!(count, hours_in_year(year).expect("valid year"));
        }
    }
}
