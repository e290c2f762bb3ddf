//! Formatted terminal output for maturity runs.
//!
//! Formatting lives in one place so the math and pipeline stay free of
//! presentation concerns.

use crate::domain::{MaturityRun, STRENGTH_UNITS, StrengthEstimate, StrengthPrediction};
use crate::error::MaturityError;

/// Full report for a single pour.
pub fn format_run_summary(run: &MaturityRun) -> String {
    let mut out = String::new();
    let r = &run.result;
    let s = &run.stats;
    let p = &run.parameters;

    out.push_str("=== cmm - Concrete maturity ===\n");
    out.push_str(&format!("Pour: {}\n", r.pour_id));
    out.push_str(&format!(
        "History: n={} | span={:.2}h | T=[{:.1}, {:.1}]°C | mean={:.2}°C\n",
        s.n_samples, s.duration_h, s.min_c, s.max_c, s.mean_c
    ));
    if s.skipped_intervals > 0 {
        out.push_str(&format!(
            "  ({} interval(s) with non-positive duration skipped)\n",
            s.skipped_intervals
        ));
    }
    out.push_str(&format!(
        "Parameters: T0={:.2}°C | Ea={:.0} J/mol | Tr={:.2}°C\n",
        p.t0_c, p.ea, p.tr_c
    ));

    out.push_str("\nMaturity:\n");
    out.push_str(&format!("- TTF          : {:>12.2} °C·h\n", r.ttf_c_h));
    out.push_str(&format!("- Equivalent age: {:>11.2} h\n", r.eq_age_h));

    if r.strength_ttf.is_some() || r.strength_eq.is_some() {
        out.push_str("\nPredicted strength:\n");
        if let Some(est) = &r.strength_ttf {
            out.push_str(&format!("- from TTF     : {}\n", fmt_estimate(est)));
        }
        if let Some(est) = &r.strength_eq {
            out.push_str(&format!("- from eq. age : {}\n", fmt_estimate(est)));
        }
    }

    out
}

/// Header + one row per pour for batch output.
pub fn format_batch_table(rows: &[(String, Result<MaturityRun, MaturityError>)]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<20} {:>12} {:>10} {:>12} {:>12}  {}\n",
            "pour_id", "ttf_c_h", "eq_age_h", "f_ttf", "f_eq", "status"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<20} {:-<12} {:-<10} {:-<12} {:-<12}  {:-<6}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (id, outcome) in rows {
        let line = match outcome {
            Ok(run) => {
                let r = &run.result;
                format!(
                    "{:<20} {:>12.2} {:>10.2} {:>12} {:>12}  ok",
                    truncate(id, 20),
                    r.ttf_c_h,
                    r.eq_age_h,
                    fmt_mean(r.strength_ttf.as_ref()),
                    fmt_mean(r.strength_eq.as_ref()),
                )
            }
            Err(err) => format!(
                "{:<20} {:>12} {:>10} {:>12} {:>12}  error: {err}",
                truncate(id, 20),
                "-",
                "-",
                "-",
                "-"
            ),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// One-line rendering of a direct strength prediction.
pub fn format_prediction(maturity: f64, curve: &str, prediction: &StrengthPrediction) -> String {
    let mut line = format!(
        "{:.2} {STRENGTH_UNITS} ({curve} @ maturity {maturity:.2})",
        prediction.mean
    );
    if let Some(ci) = prediction.interval {
        line.push_str(&format!(" [95% CI {:.2} .. {:.2}]", ci.lower, ci.upper));
    }
    line
}

fn fmt_estimate(est: &StrengthEstimate) -> String {
    match (est.lower, est.upper) {
        (Some(lo), Some(hi)) => format!("{:.2} {} [95% CI {:.2} .. {:.2}]", est.mean, est.units, lo, hi),
        _ => format!("{:.2} {}", est.mean, est.units),
    }
}

fn fmt_mean(est: Option<&StrengthEstimate>) -> String {
    est.map(|e| format!("{:.2}", e.mean)).unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfidenceInterval, MaturityResult, ModelParameters, SeriesStats};

    fn run(strength: bool) -> MaturityRun {
        let est = StrengthEstimate::from(StrengthPrediction {
            mean: 21.5,
            interval: Some(ConfidenceInterval {
                lower: 19.54,
                upper: 23.46,
            }),
        });
        MaturityRun {
            result: MaturityResult {
                pour_id: "P-1".to_string(),
                ttf_c_h: 1020.0,
                eq_age_h: 41.25,
                strength_ttf: strength.then(|| est.clone()),
                strength_eq: strength.then(|| est),
            },
            parameters: ModelParameters {
                t0_c: -10.0,
                ea: 33_500.0,
                tr_c: 20.0,
            },
            stats: SeriesStats {
                n_samples: 25,
                duration_h: 24.0,
                skipped_intervals: 2,
                min_c: 22.0,
                max_c: 38.0,
                mean_c: 31.2,
            },
        }
    }

    #[test]
    fn summary_lists_indices_and_strength() {
        let text = format_run_summary(&run(true));
        assert!(text.contains("Pour: P-1"));
        assert!(text.contains("1020.00 °C·h"));
        assert!(text.contains("41.25 h"));
        assert!(text.contains("2 interval(s)"));
        assert!(text.contains("21.50 MPa [95% CI 19.54 .. 23.46]"));

        let plain = format_run_summary(&run(false));
        assert!(!plain.contains("Predicted strength"));
    }

    #[test]
    fn batch_table_shows_errors_inline() {
        let rows = vec![
            ("P-1".to_string(), Ok(run(false))),
            (
                "P-2".to_string(),
                Err(MaturityError::NotFound("P-2".to_string())),
            ),
        ];
        let text = format_batch_table(&rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("P-1"));
        assert!(lines[2].ends_with("ok"));
        assert!(lines[3].contains("error: pour 'P-2' not found"));
    }

    #[test]
    fn prediction_line_names_curve_and_interval() {
        let with_ci = StrengthPrediction {
            mean: 23.0,
            interval: Some(ConfidenceInterval {
                lower: 21.04,
                upper: 24.96,
            }),
        };
        assert_eq!(
            format_prediction(1000.0, "log", &with_ci),
            "23.00 MPa (log @ maturity 1000.00) [95% CI 21.04 .. 24.96]"
        );

        let bare = StrengthPrediction {
            mean: 31.6,
            interval: None,
        };
        assert_eq!(format_prediction(48.0, "asymptotic", &bare), "31.60 MPa (asymptotic @ maturity 48.00)");
    }

    #[test]
    fn truncate_long_ids() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
