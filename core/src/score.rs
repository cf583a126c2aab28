// core/src/score.rs
use crate::thresholds::{ActivityThresholds, PenaltyWeights};
use crate::types::{DailyObservation, Recommendation, ScoredCandidate};
use crate::units::{comfort_index, RoundTo};

/// Vindrisiko slår inn over denne (6 m/s i backend-modellen, her i km/t).
const WIND_RISK_FLOOR_KMH: f64 = 21.6;
/// Full vindrisiko (100) nås ved 8 m/s.
const WIND_RISK_CEIL_KMH: f64 = 28.8;

/// Egnethetsscore for én dag mot et aktivitetsbånd.
///
/// Start på 100, trekk `overskridelse * vekt` per dimensjon som STRENGT
/// overskrider grensen (likhet gir ingen straff), klem til [0, 100].
/// Manglende felt (None) oppfyller alltid kravet – ingen straff.
/// Ren funksjon uten tilfeldighet: samme input gir samme score og
/// samme faktorliste, i samme rekkefølge.
pub fn suitability_score(
    day: &DailyObservation,
    thresholds: &ActivityThresholds,
) -> (f64, Vec<String>) {
    let w: &PenaltyWeights = &thresholds.weights;
    let mut score = 100.0;
    let mut factors = Vec::new();

    let mut penalize = |excess: f64, weight: f64, label: &str, factors: &mut Vec<String>| {
        let points = excess * weight;
        score -= points;
        factors.push(format!("{} ({:.0} points)", label, points));
    };

    if day.temperature_c > thresholds.max_temp_c {
        penalize(
            day.temperature_c - thresholds.max_temp_c,
            w.temp_hot,
            "Too hot",
            &mut factors,
        );
    }
    if day.temperature_c < thresholds.min_temp_c {
        penalize(
            thresholds.min_temp_c - day.temperature_c,
            w.temp_cold,
            "Too cold",
            &mut factors,
        );
    }
    if day.precipitation_mm > thresholds.max_rain_mm {
        penalize(
            day.precipitation_mm - thresholds.max_rain_mm,
            w.rain,
            "Rain above limit",
            &mut factors,
        );
    }
    if day.wind_kmh > thresholds.max_wind_kmh {
        penalize(
            day.wind_kmh - thresholds.max_wind_kmh,
            w.wind,
            "Too windy",
            &mut factors,
        );
    }
    if let Some(h) = day.humidity_pct {
        if let Some(min_h) = thresholds.humidity_min {
            if h < min_h {
                penalize(min_h - h, w.humidity_low, "Air too dry", &mut factors);
            }
        }
        if let Some(max_h) = thresholds.humidity_max {
            if h > max_h {
                penalize(h - max_h, w.humidity_high, "Too humid", &mut factors);
            }
        }
    }

    (score.clamp(0.0, 100.0).round_to(1), factors)
}

/// Komponentrisikoer 0–100 (regn, temperatur, vind) – samme modell som
/// backendens risks-blokk. Temperatur gir fast 30 utenfor båndet.
pub fn component_risks(day: &DailyObservation, thresholds: &ActivityThresholds) -> (f64, f64, f64) {
    let rain_risk = if thresholds.max_rain_mm > 0.0 {
        (day.precipitation_mm / thresholds.max_rain_mm * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    let temp_risk =
        if day.temperature_c < thresholds.min_temp_c || day.temperature_c > thresholds.max_temp_c {
            30.0
        } else {
            0.0
        };

    let wind_risk = if day.wind_kmh > WIND_RISK_FLOOR_KMH {
        (day.wind_kmh / WIND_RISK_CEIL_KMH * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    (rain_risk, temp_risk, wind_risk)
}

/// Full scoring av én dag: score, faktorer, anbefaling, risiko og komfort.
pub fn score_candidate(day: &DailyObservation, thresholds: &ActivityThresholds) -> ScoredCandidate {
    let (safety_score, safety_factors) = suitability_score(day, thresholds);
    let (rain_risk, temp_risk, wind_risk) = component_risks(day, thresholds);

    ScoredCandidate {
        day: day.clone(),
        safety_score,
        safety_factors,
        recommendation: Recommendation::from_score(safety_score),
        overall_risk: (rain_risk + temp_risk + wind_risk).round_to(1),
        comfort_index: comfort_index(day.temperature_c, day.humidity_pct).round_to(1),
    }
}
