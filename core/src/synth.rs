// core/src/synth.rs
//
// Deterministisk syntetisk værgenerator – fallback når backend ikke svarer.
// Seedes per (posisjon, dato): samme forespørsel gir alltid samme serie.

use chrono::{Datelike, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::{AnalysisRequest, DailyObservation};
use crate::units::{RoundTo, MS_TO_KMH};

/// Klimafaktorer for én måned i ett geografisk bånd.
#[derive(Debug, Clone, Copy)]
pub struct ClimateFactors {
    pub base_temp_c: f64,
    pub temp_variation: f64,
    pub rain_probability: f64,
    pub wind_factor: f64,
    pub humidity_base: f64,
}

/// Månedlige basistemperaturer, Sentral-Asia-båndet (40–50 °N, 70–85 °Ø).
const CENTRAL_ASIA_TEMPS: [f64; 12] = [
    -8.0, -5.0, 2.0, 12.0, 18.0, 23.0, 25.0, 24.0, 19.0, 11.0, 1.0, -6.0,
];

/// Månedlige basistemperaturer, default-bånd.
const DEFAULT_TEMPS: [f64; 12] = [
    2.0, 4.0, 8.0, 14.0, 19.0, 23.0, 26.0, 25.0, 21.0, 15.0, 9.0, 4.0,
];

pub fn climate_factors(lat: f64, lon: f64, month: u32) -> ClimateFactors {
    let idx = (month.clamp(1, 12) - 1) as usize;

    // Kasakhstan / Sentral-Asia
    if (40.0..=50.0).contains(&lat) && (70.0..=85.0).contains(&lon) {
        return ClimateFactors {
            base_temp_c: CENTRAL_ASIA_TEMPS[idx],
            temp_variation: 8.0,
            rain_probability: 0.2,
            wind_factor: 1.2,
            humidity_base: 65.0,
        };
    }

    ClimateFactors {
        base_temp_c: DEFAULT_TEMPS[idx],
        temp_variation: 6.0,
        rain_probability: 0.25,
        wind_factor: 1.0,
        humidity_base: 65.0,
    }
}

/// Stabilt seed fra posisjon + dato. Koordinatene kvantiseres til to
/// desimaler så nabopunkter i samme by får samme serie.
fn day_seed(lat: f64, lon: f64, date: NaiveDate) -> u64 {
    let lat_q = (lat * 100.0).round() as i64;
    let lon_q = (lon * 100.0).round() as i64;
    let days = i64::from(date.num_days_from_ce());
    (days as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(lat_q as u64)
        .rotate_left(17)
        .wrapping_add(lon_q as u64)
}

/// Ett syntetisk døgn. Ren funksjon av (lat, lon, dato).
pub fn synth_day(lat: f64, lon: f64, date: NaiveDate) -> DailyObservation {
    let factors = climate_factors(lat, lon, date.month());
    let mut rng = ChaCha8Rng::seed_from_u64(day_seed(lat, lon, date));

    let temperature_c = factors.base_temp_c
        + rng.gen_range(-factors.temp_variation..=factors.temp_variation);

    let precipitation_mm = if rng.gen::<f64>() < factors.rain_probability {
        rng.gen_range(0.5..15.0) // lett til moderat regn
    } else {
        rng.gen_range(0.0..0.5) // tørt eller antydning
    };

    let wind_ms = (3.0 + rng.gen_range(0.0..8.0)) * factors.wind_factor;
    let wind_kmh = wind_ms * MS_TO_KMH;

    let humidity = (factors.humidity_base + rng.gen_range(-15.0..20.0)).clamp(30.0, 95.0);

    // Skydekke følger nedbøren; UV dempes av skyene.
    let cloud_cover: f64 = if precipitation_mm > 0.5 {
        rng.gen_range(60.0..100.0)
    } else {
        rng.gen_range(0.0..70.0)
    };
    let uv: f64 = ((11.0 - cloud_cover / 12.0) + rng.gen_range(-1.0..1.0)).clamp(0.0, 11.0);

    DailyObservation {
        date,
        temperature_c: temperature_c.round_to(1),
        precipitation_mm: precipitation_mm.round_to(1),
        wind_kmh: wind_kmh.round_to(1),
        humidity_pct: Some(humidity.round_to(1)),
        cloud_cover_pct: Some(cloud_cover.round_to(1)),
        uv_index: Some(uv.round_to(1)),
    }
}

/// Hele vinduet [date_from, date_to], én post per døgn.
pub fn synth_window(req: &AnalysisRequest) -> Vec<DailyObservation> {
    let mut out = Vec::new();
    let mut d = req.date_from;
    while d <= req.date_to {
        out.push(synth_day(req.latitude, req.longitude, d));
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }
    out
}
