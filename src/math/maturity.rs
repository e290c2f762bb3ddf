//! Maturity indices.
//!
//! - Nurse-Saul time-temperature factor (°C·h):
//!
//!   ```text
//!   TTF = Σ (T_i - T0) · Δh_i
//!   ```
//!
//! - Arrhenius equivalent age (h) at reference temperature `Tr`:
//!
//!   ```text
//!   te = Σ Δh_i · exp(-Ea/R · (1/T_i,K - 1/Tr,K))
//!   ```
//!
//! Both use the left-endpoint intervals from `math::intervals`, return exactly
//! `0.0` for fewer than two samples and never fail.
//!
//! Temperatures at or below absolute zero (-273.15 °C) are outside the physical
//! domain of the Arrhenius term; the result for such inputs is unspecified.

use crate::domain::{ModelParameters, SeriesStats, TemperatureSample};
use crate::math::intervals::{Decomposition, Interval, decompose, decompose_sorted, hour_delta, sorted_by_time};

/// Universal gas constant, J/(mol·K).
pub const GAS_CONSTANT: f64 = 8.314;

/// Celsius to Kelvin offset.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Statistics and both indices of one series, from a single sort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesMaturity {
    pub stats: SeriesStats,
    pub ttf_c_h: f64,
    pub eq_age_h: f64,
}

/// Nurse-Saul time-temperature factor in °C·h.
///
/// May be negative when the history sits below the datum temperature.
pub fn compute_ttf(series: &[TemperatureSample], t0_c: f64) -> f64 {
    ttf_over(&decompose(series).intervals, t0_c)
}

/// Arrhenius equivalent age in hours, with `R = GAS_CONSTANT`.
pub fn compute_equivalent_age(series: &[TemperatureSample], ea: f64, tr_c: f64) -> f64 {
    compute_equivalent_age_with_r(series, ea, tr_c, GAS_CONSTANT)
}

/// Arrhenius equivalent age in hours for an explicit gas constant `r`.
pub fn compute_equivalent_age_with_r(series: &[TemperatureSample], ea: f64, tr_c: f64, r: f64) -> f64 {
    equivalent_age_over(&decompose(series).intervals, ea, tr_c, r)
}

/// Descriptive statistics of a series; `None` when it is empty.
pub fn summarize_series(series: &[TemperatureSample]) -> Option<SeriesStats> {
    let ordered = sorted_by_time(series);
    stats_of(&ordered, &decompose_sorted(&ordered))
}

/// Stats, TTF and equivalent age in one pass; `None` when the series is empty.
pub fn analyze_series(series: &[TemperatureSample], parameters: &ModelParameters) -> Option<SeriesMaturity> {
    let ordered = sorted_by_time(series);
    let decomposition = decompose_sorted(&ordered);
    let stats = stats_of(&ordered, &decomposition)?;
    Some(SeriesMaturity {
        stats,
        ttf_c_h: ttf_over(&decomposition.intervals, parameters.t0_c),
        eq_age_h: equivalent_age_over(&decomposition.intervals, parameters.ea, parameters.tr_c, GAS_CONSTANT),
    })
}

fn ttf_over(intervals: &[Interval], t0_c: f64) -> f64 {
    intervals
        .iter()
        .fold(0.0, |acc, iv| acc + (iv.celsius - t0_c) * iv.hours)
}

fn equivalent_age_over(intervals: &[Interval], ea: f64, tr_c: f64, r: f64) -> f64 {
    let tr_k = tr_c + KELVIN_OFFSET;
    intervals.iter().fold(0.0, |acc, iv| {
        let t_k = iv.celsius + KELVIN_OFFSET;
        let exponent = -ea / r * (1.0 / t_k - 1.0 / tr_k);
        acc + iv.hours * exponent.exp()
    })
}

fn stats_of(ordered: &[TemperatureSample], decomposition: &Decomposition) -> Option<SeriesStats> {
    let first = ordered.first()?;
    let last = ordered.last()?;

    let mut min_c = f64::INFINITY;
    let mut max_c = f64::NEG_INFINITY;
    let mut sum_c = 0.0;
    for s in ordered {
        min_c = min_c.min(s.celsius);
        max_c = max_c.max(s.celsius);
        sum_c += s.celsius;
    }

    Some(SeriesStats {
        n_samples: ordered.len(),
        duration_h: hour_delta(first.ts, last.ts),
        skipped_intervals: decomposition.skipped,
        min_c,
        max_c,
        mean_c: sum_c / ordered.len() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    fn hourly(temps: &[f64]) -> Vec<TemperatureSample> {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        temps
            .iter()
            .enumerate()
            .map(|(h, &c)| TemperatureSample::new(base + Duration::hours(h as i64), c))
            .collect()
    }

    /// 25 hourly samples: warm 22→34, creep to 38, cool back towards 22.
    fn curing_profile() -> Vec<TemperatureSample> {
        let temps: Vec<f64> = (0..25)
            .map(|h| match h {
                h if h < 8 => 22.0 + h as f64 * 1.5,
                h if h < 16 => 34.0 + (h - 8) as f64 * 0.5,
                h => 38.0 - (h - 16) as f64,
            })
            .collect();
        hourly(&temps)
    }

    #[test]
    fn fewer_than_two_samples_is_zero() {
        let one = hourly(&[25.0]);
        assert_eq!(compute_ttf(&[], -10.0), 0.0);
        assert_eq!(compute_ttf(&one, -10.0), 0.0);
        assert_eq!(compute_equivalent_age(&[], 33_500.0, 20.0), 0.0);
        assert_eq!(compute_equivalent_age(&one, 33_500.0, 20.0), 0.0);
    }

    #[test]
    fn ttf_left_rule_on_curing_profile() {
        let series = curing_profile();
        assert_eq!(compute_ttf(&series, -10.0), 1020.0);
        assert_eq!(compute_ttf(&series, 0.0), 780.0);
    }

    #[test]
    fn ttf_is_linear_in_datum() {
        let series = curing_profile();
        let duration = 24.0;
        for &delta in &[0.5, 3.0, 10.0] {
            let base = compute_ttf(&series, -10.0);
            let shifted = compute_ttf(&series, -10.0 + delta);
            assert!((base - shifted - delta * duration).abs() < 1e-9);
        }
    }

    #[test]
    fn ttf_can_go_negative_below_datum() {
        let series = hourly(&[-15.0, -15.0, -15.0]);
        assert_eq!(compute_ttf(&series, -10.0), -10.0);
    }

    #[test]
    fn equivalent_age_at_reference_temperature_equals_elapsed_time() {
        let series = hourly(&[20.0, 20.0, 20.0, 20.0]);
        let te = compute_equivalent_age(&series, 33_500.0, 20.0);
        assert!((te - 3.0).abs() < 1e-12);
    }

    #[test]
    fn equivalent_age_matches_closed_form_for_one_interval() {
        let series = hourly(&[30.0, 0.0]);
        let expected = (-33_500.0 / GAS_CONSTANT * (1.0 / 303.15 - 1.0 / 293.15)).exp();
        assert!((compute_equivalent_age(&series, 33_500.0, 20.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn equivalent_age_grows_with_any_sample_temperature() {
        let series = curing_profile();
        let base = compute_equivalent_age(&series, 33_500.0, 20.0);

        let mut warmer = series.clone();
        warmer[10].celsius += 5.0;
        assert!(compute_equivalent_age(&warmer, 33_500.0, 20.0) > base);

        // The final sample never opens an interval.
        let mut warmer_tail = series.clone();
        warmer_tail[24].celsius += 5.0;
        assert!(compute_equivalent_age(&warmer_tail, 33_500.0, 20.0) >= base);
    }

    #[test]
    fn explicit_gas_constant_matches_default() {
        let series = curing_profile();
        assert_eq!(
            compute_equivalent_age(&series, 33_500.0, 20.0),
            compute_equivalent_age_with_r(&series, 33_500.0, 20.0, 8.314)
        );
    }

    #[test]
    fn indices_ignore_input_order() {
        let series = curing_profile();
        let ttf = compute_ttf(&series, -10.0);
        let te = compute_equivalent_age(&series, 33_500.0, 20.0);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut shuffled = series.clone();
            shuffled.shuffle(&mut rng);
            assert_eq!(compute_ttf(&shuffled, -10.0), ttf);
            assert_eq!(compute_equivalent_age(&shuffled, 33_500.0, 20.0), te);
        }
    }

    #[test]
    fn curing_profile_indices_are_positive() {
        let series = curing_profile();
        assert!(compute_ttf(&series, -10.0) > 0.0);
        assert!(compute_equivalent_age(&series, 33_500.0, 20.0) > 0.0);
    }

    #[test]
    fn analyze_matches_the_separate_functions() {
        let mut series = curing_profile();
        series.push(series[3]);
        let mut rng = StdRng::seed_from_u64(11);
        series.shuffle(&mut rng);

        let params = ModelParameters {
            t0_c: -5.0,
            ea: 40_000.0,
            tr_c: 23.0,
        };
        let all = analyze_series(&series, &params).unwrap();
        assert_eq!(all.ttf_c_h, compute_ttf(&series, params.t0_c));
        assert_eq!(all.eq_age_h, compute_equivalent_age(&series, params.ea, params.tr_c));
        assert_eq!(Some(all.stats), summarize_series(&series));
        assert_eq!(all.stats.skipped_intervals, 1);

        assert_eq!(analyze_series(&[], &params), None);
    }

    #[test]
    fn summarize_reports_shape_and_skips() {
        let mut series = hourly(&[20.0, 30.0, 40.0]);
        series.push(series[1]);
        let stats = summarize_series(&series).unwrap();
        assert_eq!(stats.n_samples, 4);
        assert_eq!(stats.duration_h, 2.0);
        assert_eq!(stats.skipped_intervals, 1);
        assert_eq!(stats.min_c, 20.0);
        assert_eq!(stats.max_c, 40.0);
        assert_eq!(stats.mean_c, 30.0);

        assert!(summarize_series(&[]).is_none());
    }
}
