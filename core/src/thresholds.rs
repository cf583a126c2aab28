// core/src/thresholds.rs
use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::types::ActivityType;

// Flaggterskler for vindu-aggregatene (fra risikotabellen i backend).
pub const VERY_HOT_C: f64 = 35.0;
pub const VERY_COLD_C: f64 = -15.0;
pub const VERY_WINDY_KMH: f64 = 25.0;
pub const VERY_WET_MM: f64 = 20.0;
pub const VERY_HUMID_PCT: f64 = 85.0;

/// Dager med score >= denne regnes som egnet i vindu-sammendraget.
pub const SUITABLE_SCORE: f64 = 60.0;

// Risikonivå fra snitt av overall_risk (0–300 per dag).
pub const RISK_HIGH_AVG: f64 = 140.0;
pub const RISK_MEDIUM_AVG: f64 = 80.0;

/// Straffevekter per dimensjon – én tabell per aktivitet, ikke én global formel.
#[derive(Debug, Clone, Copy)]
pub struct PenaltyWeights {
    pub temp_hot: f64,
    pub temp_cold: f64,
    pub rain: f64,
    pub wind: f64,
    pub humidity_low: f64,
    pub humidity_high: f64,
}

/// Komfortbånd for én aktivitet. Uforanderlig oppslagstabell.
#[derive(Debug, Clone, Copy)]
pub struct ActivityThresholds {
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub max_wind_kmh: f64,
    pub max_rain_mm: f64,
    pub humidity_min: Option<f64>,
    pub humidity_max: Option<f64>,
    pub weights: PenaltyWeights,
}

static ACTIVITY_THRESHOLDS: Lazy<HashMap<ActivityType, ActivityThresholds>> = Lazy::new(|| {
    let mut m = HashMap::new();

    // Bryllup: regn er verst, smalt temperaturbånd.
    m.insert(
        ActivityType::Wedding,
        ActivityThresholds {
            min_temp_c: 18.0,
            max_temp_c: 28.0,
            max_wind_kmh: 25.0,
            max_rain_mm: 5.0,
            humidity_min: None,
            humidity_max: Some(80.0),
            weights: PenaltyWeights {
                temp_hot: 5.0,
                temp_cold: 5.0,
                rain: 5.0,
                wind: 2.0,
                humidity_low: 1.0,
                humidity_high: 1.5,
            },
        },
    );

    // Tur: tåler mer vind og regn, kulde straffes hardere enn varme.
    m.insert(
        ActivityType::Hiking,
        ActivityThresholds {
            min_temp_c: 10.0,
            max_temp_c: 25.0,
            max_wind_kmh: 40.0,
            max_rain_mm: 15.0,
            humidity_min: None,
            humidity_max: Some(90.0),
            weights: PenaltyWeights {
                temp_hot: 3.0,
                temp_cold: 4.0,
                rain: 3.0,
                wind: 1.5,
                humidity_low: 1.0,
                humidity_high: 1.0,
            },
        },
    );

    // Jordbruk: bredt bånd, litt fuktighet er ønsket.
    m.insert(
        ActivityType::Farming,
        ActivityThresholds {
            min_temp_c: 0.0,
            max_temp_c: 35.0,
            max_wind_kmh: 60.0,
            max_rain_mm: 40.0,
            humidity_min: Some(20.0),
            humidity_max: None,
            weights: PenaltyWeights {
                temp_hot: 2.0,
                temp_cold: 3.0,
                rain: 2.0,
                wind: 1.0,
                humidity_low: 1.0,
                humidity_high: 1.0,
            },
        },
    );

    m.insert(
        ActivityType::Festival,
        ActivityThresholds {
            min_temp_c: 15.0,
            max_temp_c: 30.0,
            max_wind_kmh: 30.0,
            max_rain_mm: 8.0,
            humidity_min: None,
            humidity_max: Some(85.0),
            weights: PenaltyWeights {
                temp_hot: 4.0,
                temp_cold: 4.0,
                rain: 4.0,
                wind: 2.0,
                humidity_low: 1.0,
                humidity_high: 1.5,
            },
        },
    );

    m.insert(ActivityType::General, general_thresholds());
    // Custom starter fra General – kalleren kan overstyre feltvis.
    m.insert(ActivityType::Custom, general_thresholds());

    m
});

fn general_thresholds() -> ActivityThresholds {
    ActivityThresholds {
        min_temp_c: 15.0,
        max_temp_c: 30.0,
        max_wind_kmh: 35.0,
        max_rain_mm: 12.0,
        humidity_min: None,
        humidity_max: Some(85.0),
        weights: PenaltyWeights {
            temp_hot: 3.0,
            temp_cold: 3.0,
            rain: 3.0,
            wind: 1.5,
            humidity_low: 1.0,
            humidity_high: 1.0,
        },
    }
}

/// Oppslag med General som fallback (tabellen dekker alle varianter).
pub fn thresholds_for(activity: ActivityType) -> ActivityThresholds {
    ACTIVITY_THRESHOLDS
        .get(&activity)
        .copied()
        .unwrap_or_else(general_thresholds)
}
