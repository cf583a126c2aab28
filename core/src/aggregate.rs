// core/src/aggregate.rs
use crate::thresholds::{
    RISK_HIGH_AVG, RISK_MEDIUM_AVG, SUITABLE_SCORE, VERY_COLD_C, VERY_HOT_C, VERY_HUMID_PCT,
    VERY_WET_MM, VERY_WINDY_KMH,
};
use crate::types::{
    AverageConditions, AverageRisks, DailyObservation, RiskLevel, ScoredCandidate, ThresholdFlags,
    WeatherWindowSummary,
};
use crate::units::RoundTo;

/// Ekstremverdier over vinduet. Ikke-finite verdier ignoreres.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowExtremes {
    pub max_temp_c: Option<f64>,
    pub min_temp_c: Option<f64>,
    pub max_wind_kmh: Option<f64>,
    pub max_precip_mm: Option<f64>,
    pub max_humidity_pct: Option<f64>,
}

fn fold_max(acc: Option<f64>, x: f64) -> Option<f64> {
    if !x.is_finite() {
        return acc;
    }
    Some(match acc {
        Some(a) => a.max(x),
        None => x,
    })
}

fn fold_min(acc: Option<f64>, x: f64) -> Option<f64> {
    if !x.is_finite() {
        return acc;
    }
    Some(match acc {
        Some(a) => a.min(x),
        None => x,
    })
}

pub fn window_extremes(days: &[DailyObservation]) -> WindowExtremes {
    let mut ext = WindowExtremes::default();
    for d in days {
        ext.max_temp_c = fold_max(ext.max_temp_c, d.temperature_c);
        ext.min_temp_c = fold_min(ext.min_temp_c, d.temperature_c);
        ext.max_wind_kmh = fold_max(ext.max_wind_kmh, d.wind_kmh);
        ext.max_precip_mm = fold_max(ext.max_precip_mm, d.precipitation_mm);
        if let Some(h) = d.humidity_pct {
            ext.max_humidity_pct = fold_max(ext.max_humidity_pct, h);
        }
    }
    ext
}

/// De fem risikoflaggene fra faste terskler (strengt større/mindre enn).
pub fn threshold_flags(days: &[DailyObservation]) -> ThresholdFlags {
    let ext = window_extremes(days);
    ThresholdFlags {
        very_hot: ext.max_temp_c.map_or(false, |t| t > VERY_HOT_C),
        very_cold: ext.min_temp_c.map_or(false, |t| t < VERY_COLD_C),
        very_windy: ext.max_wind_kmh.map_or(false, |w| w > VERY_WINDY_KMH),
        very_wet: ext.max_precip_mm.map_or(false, |p| p > VERY_WET_MM),
        very_uncomfortable: ext.max_humidity_pct.map_or(false, |h| h > VERY_HUMID_PCT),
    }
}

/// Vindu-sammendrag: antall dager, egnede dager (score >= 60) og
/// risikonivå fra snittet av overall_risk. Tomt vindu => Unknown.
pub fn window_summary(scored: &[ScoredCandidate]) -> WeatherWindowSummary {
    let total_days = scored.len();
    if total_days == 0 {
        return WeatherWindowSummary::default();
    }

    let suitable_days = scored
        .iter()
        .filter(|c| c.safety_score >= SUITABLE_SCORE)
        .count();

    let avg_risk =
        scored.iter().map(|c| c.overall_risk).sum::<f64>() / total_days as f64;

    let risk_level = if avg_risk > RISK_HIGH_AVG {
        RiskLevel::High
    } else if avg_risk > RISK_MEDIUM_AVG {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    WeatherWindowSummary {
        total_days,
        suitable_days,
        risk_level,
    }
}

/// Snittforhold over vinduet. Fuktighet midles bare over dager som har verdi.
pub fn average_conditions(days: &[DailyObservation]) -> AverageConditions {
    if days.is_empty() {
        return AverageConditions::default();
    }
    let n = days.len() as f64;

    let mut hum_sum = 0.0;
    let mut hum_cnt = 0usize;
    for d in days {
        if let Some(h) = d.humidity_pct {
            if h.is_finite() {
                hum_sum += h;
                hum_cnt += 1;
            }
        }
    }

    AverageConditions {
        temperature_c: (days.iter().map(|d| d.temperature_c).sum::<f64>() / n).round_to(1),
        precipitation_mm: (days.iter().map(|d| d.precipitation_mm).sum::<f64>() / n).round_to(1),
        wind_kmh: (days.iter().map(|d| d.wind_kmh).sum::<f64>() / n).round_to(1),
        humidity_pct: if hum_cnt > 0 {
            (hum_sum / hum_cnt as f64).round_to(1)
        } else {
            0.0
        },
    }
}

/// Snitt av komponentrisikoene over vinduet, mot samme aktivitetsbånd
/// som scoringen brukte.
pub fn average_risks(
    scored: &[ScoredCandidate],
    thresholds: &crate::thresholds::ActivityThresholds,
) -> AverageRisks {
    if scored.is_empty() {
        return AverageRisks::default();
    }
    let n = scored.len() as f64;

    let mut rain = 0.0;
    let mut temp = 0.0;
    let mut wind = 0.0;
    for c in scored {
        let (r, t, w) = crate::score::component_risks(&c.day, thresholds);
        rain += r;
        temp += t;
        wind += w;
    }

    AverageRisks {
        heavy_rain: (rain / n).round_to(1),
        temperature_extreme: (temp / n).round_to(1),
        strong_wind: (wind / n).round_to(1),
    }
}
