//! Post-hoc statistics over a generated series.

use std::fmt;

use crate::series::{HourlyRecord, SeriesKind};

/// Aggregates of one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: u32,
    pub rows: usize,
    pub total: f64,
    pub mean: f64,
}

/// Aggregate statistics derived from a complete series.
///
/// Computed from the rounded records, so totals match what lands in the CSV.
#[derive(Debug, Clone)]
pub struct SeriesSummary {
    pub kind: SeriesKind,
    pub rows: usize,
    pub total: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// One entry per month present in the series, in calendar order.
    pub months: Vec<MonthSummary>,
}

impl SeriesSummary {
    /// Computes the summary from the complete record vector.
    ///
    /// # Arguments
    ///
    /// * `kind` - Which series the records belong to
    /// * `records` - Rows in output order
    pub fn from_records(kind: SeriesKind, records: &[HourlyRecord]) -> Self {
        if records.is_empty() {
            return Self {
                kind,
                rows: 0,
                total: 0.0,
                mean: 0.0,
                min: 0.0,
                max: 0.0,
                months: Vec::new(),
            };
        }

        let mut total = 0.0_f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut months: Vec<MonthSummary> = Vec::with_capacity(12);

        for r in records {
            total += r.value;
            min = min.min(r.value);
            max = max.max(r.value);

            match months.last_mut() {
                Some(m) if m.month == r.month => {
                    m.rows += 1;
                    m.total += r.value;
                }
                _ => months.push(MonthSummary {
                    month: r.month,
                    rows: 1,
                    total: r.value,
                    mean: 0.0,
                }),
            }
        }

        for m in &mut months {
            m.mean = m.total / m.rows as f64;
        }

        Self {
            kind,
            rows: records.len(),
            total,
            mean: total / records.len() as f64,
            min,
            max,
            months,
        }
    }
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.kind.unit();
        let p = self.kind.decimals();
        writeln!(f, "--- {} series ---", self.kind)?;
        writeln!(f, "Rows:   {}", self.rows)?;
        writeln!(f, "Total:  {:.p$} {unit}", self.total)?;
        writeln!(f, "Mean:   {:.p$} {unit}", self.mean)?;
        writeln!(f, "Range:  {:.p$} .. {:.p$} {unit}", self.min, self.max)?;
        for m in &self.months {
            writeln!(
                f,
                "  {:>2}: total {:>12.p$}  mean {:>10.p$}  ({} rows)",
                m.month, m.total, m.mean, m.rows
            )?;
        }
        Ok(())
    }
}
