//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the temperature source and the request
//! - runs the maturity pipeline
//! - prints reports and writes optional exports

use clap::Parser;

use crate::cli::{BatchArgs, Command, ComputeArgs, CurveArgs, PredictArgs, RequestArgs, SourceArgs, SourceKind};
use crate::config::MaturityDefaults;
use crate::data::{HttpSource, SyntheticSource, TemperatureSource};
use crate::domain::{CurveParams, MaturityRequest, MaturityRun};
use crate::error::{AppError, MaturityError};

pub mod pipeline;

pub use pipeline::MaturityService;

/// Entry point for the `cmm` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    crate::logging::init();

    match cli.command {
        Command::Compute(args) => handle_compute(args),
        Command::Batch(args) => handle_batch(args),
        Command::Predict(args) => handle_predict(args),
    }
}

fn handle_compute(args: ComputeArgs) -> Result<(), AppError> {
    let defaults = MaturityDefaults::from_env()?;
    let (source, _) = build_source(&args.source)?;
    let request = request_from_args(&args.request)?;

    let service = MaturityService::new(source, defaults);
    let run = service.run(&args.pour_id, &request)?;

    if args.json {
        println!("{}", to_json(&run.result)?);
    } else {
        println!("{}", crate::report::format_run_summary(&run));
    }

    if let Some(path) = &args.export {
        crate::io::write_runs_json(path, std::slice::from_ref(&run))?;
    }

    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let defaults = MaturityDefaults::from_env()?;
    let (source, known_ids) = build_source(&args.source)?;
    let request = request_from_args(&args.request)?;

    let pour_ids = if args.pour_ids.is_empty() {
        known_ids.ok_or_else(|| {
            AppError::new(2, "No pour ids given (list them, or use --source csv to run every pour in the file)")
        })?
    } else {
        args.pour_ids.clone()
    };

    let service = MaturityService::new(source, defaults);
    let rows = service.compute_many(&pour_ids, &request);

    if args.json {
        for line in batch_json_lines(&rows)? {
            println!("{line}");
        }
    } else {
        print!("{}", crate::report::format_batch_table(&rows));
    }

    let failures: Vec<_> = rows.iter().filter_map(|(_, r)| r.as_ref().err()).collect();

    if let Some(path) = &args.export {
        let runs: Vec<MaturityRun> = rows.iter().filter_map(|(_, r)| r.as_ref().ok().cloned()).collect();
        crate::io::write_runs_json(path, &runs)?;
    }

    match failures.first() {
        None => Ok(()),
        Some(first) => {
            tracing::warn!(failed = failures.len(), total = rows.len(), "batch finished with failures");
            Err(AppError::new(
                first.exit_code(),
                format!("{} of {} pour(s) failed", failures.len(), rows.len()),
            ))
        }
    }
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let Some(curve) = args.curve.curve.as_deref() else {
        return Err(AppError::new(2, "--curve is required (log | asymptotic)"));
    };
    let params = overlay_params(CurveParams::default(), &args.curve);
    let prediction = crate::models::predict_strength(args.maturity, curve, &params)?;
    println!("{}", crate::report::format_prediction(args.maturity, curve, &prediction));
    Ok(())
}

/// Build the temperature source. For CSV input also returns every pour id in the file.
fn build_source(args: &SourceArgs) -> Result<(Box<dyn TemperatureSource>, Option<Vec<String>>), AppError> {
    match args.source {
        SourceKind::Synthetic => Ok((Box::new(SyntheticSource::new()), None)),
        SourceKind::Http => Ok((Box::new(HttpSource::from_env()?), None)),
        SourceKind::Csv => {
            let path = args
                .readings
                .as_ref()
                .ok_or_else(|| AppError::new(2, "--source csv requires --readings <CSV>"))?;
            let ingested = crate::io::load_readings_csv(path)?;
            let ids = ingested.source.pour_ids();
            Ok((Box::new(ingested.source), Some(ids)))
        }
    }
}

/// Request file (if any), then flag overrides on top.
pub fn request_from_args(args: &RequestArgs) -> Result<MaturityRequest, AppError> {
    let mut req = match &args.request {
        Some(path) => crate::io::read_request_json(path)?,
        None => MaturityRequest::default(),
    };

    if let Some(curve) = &args.curve.curve {
        req.curve_type = Some(curve.clone());
    }
    if args.curve.has_params() {
        let base = req.curve_params.take().unwrap_or_default();
        req.curve_params = Some(overlay_params(base, &args.curve));
    }
    if req.curve_type.is_some() && req.curve_params.is_none() {
        tracing::warn!("curve selected without parameters; strength prediction skipped");
    }

    if args.t0_c.is_some() {
        req.t0_c = args.t0_c;
    }
    if args.ea.is_some() {
        req.ea = args.ea;
    }
    if args.tr_c.is_some() {
        req.tr_c = args.tr_c;
    }

    Ok(req)
}

fn overlay_params(mut params: CurveParams, args: &CurveArgs) -> CurveParams {
    params.a = args.a.or(params.a);
    params.b = args.b.or(params.b);
    params.f_u = args.f_u.or(params.f_u);
    params.k = args.k.or(params.k);
    params.sigma = args.sigma.or(params.sigma);
    if let Some(min) = args.min_maturity {
        params.min_maturity = min;
    }
    params
}

/// One compact JSON document per pour: the response on success, `{pour_id, error}` otherwise.
fn batch_json_lines(rows: &[(String, Result<MaturityRun, MaturityError>)]) -> Result<Vec<String>, AppError> {
    rows.iter()
        .map(|(id, outcome)| match outcome {
            Ok(run) => serde_json::to_string(&run.result),
            Err(err) => serde_json::to_string(&serde_json::json!({ "pour_id": id, "error": err.to_string() })),
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::new(1, format!("Failed to encode JSON: {e}")))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::new(1, format!("Failed to encode JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_override_request_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"curve_type":"log","curve_params":{{"a":4.2,"b":-6.0,"sigma":0.8}},"T0_c":-5.0,"Ea":40000}}"#
        )
        .unwrap();

        let args = RequestArgs {
            request: Some(file.path().to_path_buf()),
            curve: CurveArgs {
                b: Some(-7.5),
                ..CurveArgs::default()
            },
            t0_c: Some(0.0),
            ..RequestArgs::default()
        };
        let req = request_from_args(&args).unwrap();
        assert_eq!(req.curve_type.as_deref(), Some("log"));
        let params = req.curve_params.unwrap();
        assert_eq!(params.a, Some(4.2));
        assert_eq!(params.b, Some(-7.5));
        assert_eq!(params.sigma, Some(0.8));
        assert_eq!(req.t0_c, Some(0.0));
        assert_eq!(req.ea, Some(40_000.0));
        assert_eq!(req.tr_c, None);
    }

    #[test]
    fn curve_flag_alone_leaves_params_unset() {
        let args = RequestArgs {
            curve: CurveArgs {
                curve: Some("asymptotic".to_string()),
                ..CurveArgs::default()
            },
            ..RequestArgs::default()
        };
        let req = request_from_args(&args).unwrap();
        assert_eq!(req.curve_type.as_deref(), Some("asymptotic"));
        assert!(req.curve_params.is_none());
    }

    #[test]
    fn batch_json_is_one_document_per_line() {
        let service = MaturityService::new(SyntheticSource::new(), MaturityDefaults::default());
        let req = MaturityRequest {
            curve_type: Some("log".to_string()),
            curve_params: Some(CurveParams::log(4.2, -6.0).with_sigma(0.8)),
            ..MaturityRequest::default()
        };
        let ids = vec!["P-1".to_string(), " ".to_string()];
        let rows = service.compute_many(&ids, &req);

        let text = batch_json_lines(&rows).unwrap().join("\n");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let values: Vec<serde_json::Value> = lines.iter().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(values[0]["pour_id"], "P-1");
        assert_eq!(values[0]["strength_ttf"]["units"], "MPa");
        assert_eq!(values[1]["pour_id"], " ");
        assert!(values[1]["error"].as_str().unwrap().contains("not found"));
    }

    #[test]
    fn csv_source_requires_path() {
        let args = SourceArgs {
            source: SourceKind::Csv,
            readings: None,
        };
        let err = build_source(&args).err().unwrap();
        assert_eq!(err.exit_code(), 2);
    }
}
