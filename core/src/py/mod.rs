// Tynn JSON-adapter mot verten (Python-backend eller annen JSON-taler).
// All logikk ligger i kjernen; her skjer bare tolerant parsing inn og
// serialisering ut.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{self as json, json, Value};
use serde_path_to_error as spte;

use crate::analysis::analyze_weather_window;
use crate::normalize::{map_day, map_days, normalize_results_str};
use crate::scanner::{scan_alternatives, CancelToken, ScanConfig, ScanInputs, ScanOutcome};
use crate::score::score_candidate;
use crate::source::{SourceChain, DEFAULT_BACKEND_URL};
use crate::thresholds::thresholds_for;
use crate::types::{ActivityType, AnalysisRequest};

// ──────────────────────────────────────────────────────────────────────────────
// TOLERANT FORESPØRSELS-FORM (aliaser for camelCase/snake_case-klienter)
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RequestInTol {
    #[serde(default, alias = "locationName", alias = "location")]
    location_name: Option<String>,
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lon", alias = "lng")]
    longitude: f64,
    #[serde(alias = "dateFrom", alias = "startDate", alias = "start_date")]
    date_from: String,
    #[serde(alias = "dateTo", alias = "endDate", alias = "end_date")]
    date_to: String,
    #[serde(default, alias = "activityType", alias = "activity_type")]
    activity: Option<String>,
    #[serde(default, alias = "baseUrl", alias = "backendUrl", alias = "backend_url")]
    base_url: Option<String>,
    /// true => hopp over backend og bruk bare syntetisk generator.
    #[serde(default, alias = "mock")]
    offline: bool,
}

/// Datoparsing med samme formatliste som backenden godtar.
fn parse_date_tol(s: &str) -> Result<NaiveDate, String> {
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s.trim(), fmt) {
            return Ok(d);
        }
    }
    Err(format!("unparseable date: {s}"))
}

fn parse_request(json_in: &str) -> Result<(AnalysisRequest, Option<String>, bool), String> {
    let mut de = json::Deserializer::from_str(json_in);
    let parsed: RequestInTol = spte::deserialize(&mut de)
        .map_err(|e| format!("parse error (AnalysisRequest) at {}: {}", e.path(), e))?;

    let req = AnalysisRequest {
        location_name: parsed.location_name,
        latitude: parsed.latitude,
        longitude: parsed.longitude,
        date_from: parse_date_tol(&parsed.date_from)?,
        date_to: parse_date_tol(&parsed.date_to)?,
        activity: ActivityType::from_id(parsed.activity.as_deref().unwrap_or("general")),
    };
    Ok((req, parsed.base_url, parsed.offline))
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-FUNKSJONER (JSON-streng inn, JSON-streng ut)
// ──────────────────────────────────────────────────────────────────────────────

/// Full analyse: backend om tilgjengelig, ellers syntetisk fallback.
#[pyfunction]
fn analyze_weather_window_json(json_str: &str) -> PyResult<String> {
    let (req, base_url, offline) = parse_request(json_str).map_err(PyValueError::new_err)?;

    let metrics = std::sync::Arc::new(crate::metrics::Metrics::new());
    let chain = if offline {
        SourceChain::synthetic_only(metrics)
    } else {
        SourceChain::with_backend(
            base_url.unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            metrics,
        )
    };

    let result = analyze_weather_window(&req, &chain)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    serde_json::to_string(&result).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Normaliser et vilkårlig resultatobjekt. Feiler aldri på innholdet –
/// ugyldig input gir default-formen med error satt.
#[pyfunction]
fn normalize_result_json(json_str: &str) -> PyResult<String> {
    let normalized = normalize_results_str(json_str);
    serde_json::to_string(&normalized).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Scor én dag mot et aktivitetsbånd: {"day": {...}, "activity": "wedding"}.
#[pyfunction]
fn score_day_json(json_str: &str) -> PyResult<String> {
    let raw: Value = serde_json::from_str(json_str)
        .map_err(|e| PyValueError::new_err(format!("invalid JSON: {e}")))?;

    let day_val = raw.get("day").unwrap_or(&raw);
    let day = map_day(day_val)
        .ok_or_else(|| PyValueError::new_err("day record missing or lacks a parseable date"))?;

    let activity = raw
        .get("activity")
        .and_then(Value::as_str)
        .map(ActivityType::from_id)
        .unwrap_or_default();

    let scored = score_candidate(&day, &thresholds_for(activity));
    serde_json::to_string(&scored).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Kjør alternativ-dato-skannet over et medsendt datasett:
/// {"days": [...], "external": [...], "activity": "...", "today": "YYYY-MM-DD",
///  "search_range_days": 90}
#[pyfunction]
fn find_alternative_dates_json(json_str: &str) -> PyResult<String> {
    let raw: Value = serde_json::from_str(json_str)
        .map_err(|e| PyValueError::new_err(format!("invalid JSON: {e}")))?;

    let days = raw
        .get("days")
        .map(map_days)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| PyValueError::new_err("days: empty or missing"))?;

    let external = raw.get("external").map(map_days).unwrap_or_default();

    let activity = raw
        .get("activity")
        .and_then(Value::as_str)
        .map(ActivityType::from_id)
        .unwrap_or_default();

    let today = match raw.get("today").and_then(Value::as_str) {
        Some(s) => parse_date_tol(s).map_err(PyValueError::new_err)?,
        None => chrono::Utc::now().date_naive(),
    };

    let mut config = ScanConfig::default();
    if let Some(range) = raw.get("search_range_days").and_then(Value::as_i64) {
        config.search_range_days = range;
    }

    let inputs = ScanInputs {
        days: &days,
        external: &external,
        activity,
        today,
        config,
    };

    let token = CancelToken::new();
    let report = scan_alternatives(&inputs, &token, || {}, |_partial| {});

    let out = json!({
        "outcome": match report.outcome {
            ScanOutcome::Completed => "completed",
            ScanOutcome::Aborted => "aborted",
        },
        "pool_size": report.pool_size,
        "scored": report.scored,
        "best": report.best,
    });
    Ok(out.to_string())
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn paradeguard_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze_weather_window_json, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_result_json, m)?)?;
    m.add_function(wrap_pyfunction!(score_day_json, m)?)?;
    m.add_function(wrap_pyfunction!(find_alternative_dates_json, m)?)?;
    Ok(())
}
