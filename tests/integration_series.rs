//! Integration tests for the two generators and their CSV form.

mod common;

use approx::assert_abs_diff_eq;
use grid_mockdata::calendar::days_in_month;
use grid_mockdata::io::export::write_series;
use grid_mockdata::io::import::read_series;
use grid_mockdata::series::{
    HourlyRecord, HourlySeries, HouseholdConsumption, SeriesKind, round_to,
};

fn assert_row_invariants(rows: &[HourlyRecord]) {
    for r in rows {
        assert!((1..=12).contains(&r.month), "bad month in {r:?}");
        let days = days_in_month(common::YEAR, r.month).expect("valid month");
        assert!(r.day >= 1 && r.day <= days, "bad day in {r:?}");
        assert!(r.hour <= 23, "bad hour in {r:?}");
    }
}

#[test]
fn both_series_cover_the_leap_year() {
    let household = common::seeded_household(1);
    let price = common::seeded_price(1);
    assert_eq!(household.len(), 8784);
    assert_eq!(price.len(), 8784);
    assert_row_invariants(&household);
    assert_row_invariants(&price);
}

#[test]
fn rows_per_month_follow_the_calendar() {
    for rows in [common::flat_household(), common::flat_price()] {
        for month in 1..=12 {
            let days = days_in_month(common::YEAR, month).expect("valid month") as usize;
            let n = rows.iter().filter(|r| r.month == month).count();
            assert_eq!(n, days * 24, "month {month}");
        }
    }
}

#[test]
fn series_validate_against_calendar() {
    HourlySeries::new(
        SeriesKind::Household,
        common::YEAR,
        common::seeded_household(9),
    )
    .expect("household series should validate");
    HourlySeries::new(SeriesKind::Price, common::YEAR, common::seeded_price(9))
        .expect("price series should validate");
}

#[test]
fn flat_household_matches_closed_form() {
    let generator = HouseholdConsumption::default();
    let rows = common::flat_household();
    for r in &rows {
        let days = days_in_month(common::YEAR, r.month).expect("valid month");
        let total = generator.monthly_kwh.get(r.month).expect("valid month");
        let expected = total / f64::from(days) / 24.0 * generator.profile().0[r.hour as usize];
        assert_abs_diff_eq!(r.value, expected, epsilon = 5e-5 + 1e-12);
    }
}

#[test]
fn august_eight_am_reference_value() {
    let series = HourlySeries::new(SeriesKind::Household, common::YEAR, common::flat_household())
        .expect("valid series");
    let normalized = HouseholdConsumption::default().profile().0[8];
    let expected = round_to(363.0 / 31.0 / 24.0 * normalized, 4);
    for day in 1..=31 {
        assert_eq!(series.value_at(8, day, 8), Some(expected));
    }
    assert_abs_diff_eq!(expected, 0.5311, epsilon = 1e-9);
}

#[test]
fn household_profile_normalises_to_24() {
    assert_abs_diff_eq!(
        HouseholdConsumption::default().profile().sum(),
        24.0,
        epsilon = 1e-9
    );
}

#[test]
fn flat_runs_render_identical_bytes() {
    for (kind, a, b) in [
        (SeriesKind::Household, common::flat_household(), common::flat_household()),
        (SeriesKind::Price, common::flat_price(), common::flat_price()),
    ] {
        let mut buf_a = Vec::new();
        let mut buf_b = Vec::new();
        write_series(&a, kind, &mut buf_a).expect("write a");
        write_series(&b, kind, &mut buf_b).expect("write b");
        assert_eq!(buf_a, buf_b);
    }
}

#[test]
fn different_seeds_differ() {
    assert_ne!(common::seeded_household(1), common::seeded_household(2));
    assert_ne!(common::seeded_price(1), common::seeded_price(2));
}

#[test]
fn written_series_reads_back() {
    let rows = common::seeded_price(3);
    let mut buf = Vec::new();
    write_series(&rows, SeriesKind::Price, &mut buf).expect("write");
    let back = read_series(buf.as_slice(), SeriesKind::Price).expect("read");
    assert_eq!(back, rows);

    let rows = common::seeded_household(3);
    let mut buf = Vec::new();
    write_series(&rows, SeriesKind::Household, &mut buf).expect("write");
    let text = String::from_utf8(buf).expect("utf-8");
    assert_eq!(text.lines().count(), 8785);
    let first = text.lines().nth(1).expect("first data row");
    let value = first.rsplit(',').next().expect("value column");
    let (_, decimals) = value.split_once('.').expect("fixed-point value");
    assert_eq!(decimals.len(), 4, "{first}");
}
