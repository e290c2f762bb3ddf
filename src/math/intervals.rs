//! Interval decomposition of a temperature history.
//!
//! Both maturity indices integrate over the same intervals:
//!
//! ```text
//! sort samples by timestamp (stable)
//! for each consecutive pair (s_i, s_{i+1}):
//!     Δh = (t_{i+1} - t_i) in hours
//!     Δh <= 0  -> skipped (duplicate timestamp), contributes nothing
//!     Δh  > 0  -> interval at the left-endpoint temperature T_i
//! ```
//!
//! Skipping is deliberately forgiving: malformed histories never fail here.
//! Callers that care about data quality read `Decomposition::skipped`.

use chrono::{DateTime, Utc};

use crate::domain::TemperatureSample;

/// One integration step: the left-endpoint temperature held for `hours`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub celsius: f64,
    pub hours: f64,
}

/// Positive-duration intervals plus the number of pairs that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decomposition {
    pub intervals: Vec<Interval>,
    pub skipped: usize,
}

/// Copy `series` sorted ascending by timestamp.
///
/// The sort is stable, so samples sharing a timestamp keep their input order.
pub fn sorted_by_time(series: &[TemperatureSample]) -> Vec<TemperatureSample> {
    let mut ordered = series.to_vec();
    ordered.sort_by_key(|s| s.ts);
    ordered
}

/// Signed elapsed time from `start` to `end`, in hours.
pub fn hour_delta(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let delta = end - start;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 3_600_000_000.0,
        // Only reachable for spans of ~290k years; millisecond precision is plenty there.
        None => delta.num_milliseconds() as f64 / 3_600_000.0,
    }
}

/// Split a series into left-endpoint integration intervals.
///
/// Fewer than two samples yields no intervals.
pub fn decompose(series: &[TemperatureSample]) -> Decomposition {
    decompose_sorted(&sorted_by_time(series))
}

/// `decompose` for a series already in time order (see `sorted_by_time`).
pub fn decompose_sorted(ordered: &[TemperatureSample]) -> Decomposition {
    let mut out = Decomposition::default();

    for pair in ordered.windows(2) {
        let hours = hour_delta(pair[0].ts, pair[1].ts);
        if hours <= 0.0 {
            out.skipped += 1;
            continue;
        }
        out.intervals.push(Interval {
            celsius: pair[0].celsius,
            hours,
        });
    }

    out
}
