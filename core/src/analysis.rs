// core/src/analysis.rs
use thiserror::Error;

use crate::aggregate::{average_conditions, average_risks, threshold_flags, window_summary};
use crate::score::score_candidate;
use crate::source::WeatherDataSource;
use crate::thresholds::thresholds_for;
use crate::types::{AnalysisRequest, AnalysisResult, ScoredCandidate};

/// Antall dager som løftes frem som "beste dager".
pub const BEST_DAYS_LIMIT: usize = 5;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Ugyldig forespørsel – analyse forsøkes ikke.
    #[error("invalid request: {0}")]
    Validation(String),
    /// Ingen kilde ga data (skal ikke skje med syntetisk fallback i kjeden).
    #[error("no data available: {0}")]
    NoData(String),
}

/// Valider forespørselen før noe hentes. Feilkodene er korte og stabile
/// slik at verten kan vise dem som inline-melding.
pub fn validate_request(req: &AnalysisRequest) -> Result<(), AnalysisError> {
    if !req.latitude.is_finite() || !(-90.0..=90.0).contains(&req.latitude) {
        return Err(AnalysisError::Validation("latitude_out_of_range".into()));
    }
    if !req.longitude.is_finite() || !(-180.0..=180.0).contains(&req.longitude) {
        return Err(AnalysisError::Validation("longitude_out_of_range".into()));
    }
    if let Some(name) = &req.location_name {
        if name.trim().is_empty() {
            return Err(AnalysisError::Validation("empty_location_name".into()));
        }
    }
    // Strengt: sluttdato må være ETTER startdato.
    if req.date_from >= req.date_to {
        return Err(AnalysisError::Validation("date_from_not_before_date_to".into()));
    }
    Ok(())
}

/// Kjør hele analysen: valider, hent vindu via kilden (kjeden håndterer
/// backend-fall og fallback selv), scor hver dag og bygg resultatet.
/// Resultatet erstatter alltid forrige i sin helhet.
pub fn analyze_weather_window(
    req: &AnalysisRequest,
    source: &dyn WeatherDataSource,
) -> Result<AnalysisResult, AnalysisError> {
    validate_request(req)?;

    let fetched = source
        .fetch_window(req)
        .ok_or_else(|| AnalysisError::NoData("all sources exhausted".into()))?;

    let thresholds = thresholds_for(req.activity);

    let scored: Vec<ScoredCandidate> = fetched
        .days
        .iter()
        .map(|d| score_candidate(d, &thresholds))
        .collect();

    let mut best_days = scored.clone();
    best_days.sort_by(|a, b| {
        b.safety_score
            .partial_cmp(&a.safety_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.day.date.cmp(&b.day.date))
    });
    best_days.truncate(BEST_DAYS_LIMIT);

    let location = req
        .location_name
        .clone()
        .unwrap_or_else(|| format!("{:.2}, {:.2}", req.latitude, req.longitude));

    Ok(AnalysisResult {
        weather_window: window_summary(&scored),
        threshold_analysis: threshold_flags(&fetched.days),
        average_conditions: average_conditions(&fetched.days),
        average_risks: average_risks(&scored, &thresholds),
        best_days,
        nasa_data_sources: vec![fetched.source],
        location,
        date_range: format!("{} to {}", req.date_from, req.date_to),
        confidence: fetched.confidence,
        error: None,
    })
}
