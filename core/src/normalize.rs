// core/src/normalize.rs
//
// Tolerant omforming av vilkårlig JSON (backend eller lokal generator) til
// ett kanonisk AnalysisResult. Samme mønster som resten av kjeden:
// streng parse først, deretter tolerant felt-vandring. Feiler aldri –
// ikke-objekt gir default-form med error satt.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};
use serde_path_to_error as spte;

use crate::aggregate::{average_conditions, threshold_flags, window_summary};
use crate::types::{
    AnalysisResult, AverageConditions, AverageRisks, DailyObservation, Recommendation, RiskLevel,
    ScoredCandidate, ThresholdFlags, WeatherWindowSummary,
};
use crate::units::{comfort_index, wind_to_kmh, WindUnit};

/// Første nøkkel som finnes vinner – camelCase listes først og foretrekkes
/// derfor når begge varianter er til stede.
fn pick<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k))
}

fn num(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|x| x.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
        _ => None,
    }
}

fn pick_num(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    pick(obj, keys).and_then(num)
}

fn pick_str<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    pick(obj, keys).and_then(Value::as_str)
}

/// Datoparsing med samme formatliste som backenden godtar.
fn parse_date_any(v: &Value) -> Option<NaiveDate> {
    let s = v.as_str()?;
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s.trim(), fmt) {
            return Some(d);
        }
    }
    None
}

// ── Streng dagsform (rask vei) ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct DayInStrict {
    date: NaiveDate,
    #[serde(alias = "temperature_c", alias = "temperatureC")]
    temperature: f64,
    #[serde(default, alias = "precipitation_mm", alias = "precipitationMm")]
    precipitation: f64,
    // km/t-merkede nøkler passerer urørt ...
    #[serde(default, alias = "wind_kmh", alias = "windKmh", alias = "wind_speed_kmh")]
    wind_kmh: Option<f64>,
    // ... m/s-merkede konverteres nøyaktig én gang i to_observation().
    #[serde(default, alias = "windSpeed", alias = "wind_speed_ms", alias = "wind_ms")]
    wind_speed: Option<f64>,
    #[serde(default, alias = "humidity_pct", alias = "humidityPct")]
    humidity: Option<f64>,
    #[serde(default, alias = "cloud_cover", alias = "cloudCover")]
    cloud_cover_pct: Option<f64>,
    #[serde(default, alias = "uv_index", alias = "uvIndex")]
    uv_index: Option<f64>,
}

impl DayInStrict {
    fn to_observation(&self) -> DailyObservation {
        let wind_kmh = match (self.wind_kmh, self.wind_speed) {
            (Some(kmh), _) => wind_to_kmh(kmh, WindUnit::Kmh),
            (None, Some(ms)) => wind_to_kmh(ms, WindUnit::Ms),
            (None, None) => 0.0,
        };
        DailyObservation {
            date: self.date,
            temperature_c: self.temperature,
            precipitation_mm: self.precipitation,
            wind_kmh,
            humidity_pct: self.humidity,
            cloud_cover_pct: self.cloud_cover_pct,
            uv_index: self.uv_index,
        }
    }
}

// ── Tolerant dagsform (fallback-vandring) ────────────────────────────────

fn map_day_tolerant(obj: &Map<String, Value>) -> Option<DailyObservation> {
    let date = parse_date_any(pick(obj, &["date", "day"])?)?;

    // Værfeltene kan ligge flatt eller i en nestet conditions-blokk.
    let src = match pick(obj, &["conditions", "predicted_conditions", "predictedConditions"]) {
        Some(Value::Object(c)) => c,
        _ => obj,
    };

    let temperature_c =
        pick_num(src, &["temperature", "temperatureC", "temperature_c", "temp"]).unwrap_or(15.0);
    let precipitation_mm = pick_num(
        src,
        &["precipitation", "precipitationMm", "precipitation_mm", "rain"],
    )
    .unwrap_or(0.0);

    // Enhetsvern: km/t-nøkler først, deretter m/s-nøkler med én konvertering.
    let wind_kmh = if let Some(v) = pick_num(src, &["windKmh", "wind_kmh", "wind_speed_kmh"]) {
        wind_to_kmh(v, WindUnit::Kmh)
    } else if let Some(v) = pick_num(
        src,
        &["windSpeedMs", "wind_speed_ms", "wind_ms", "windSpeed", "wind_speed"],
    ) {
        wind_to_kmh(v, WindUnit::Ms)
    } else {
        0.0
    };

    Some(DailyObservation {
        date,
        temperature_c,
        precipitation_mm,
        wind_kmh,
        humidity_pct: pick_num(src, &["humidity", "humidityPct", "humidity_pct"]),
        cloud_cover_pct: pick_num(src, &["cloudCover", "cloud_cover", "cloud_cover_pct"]),
        uv_index: pick_num(src, &["uvIndex", "uv_index"]),
    })
}

/// Én dagspost -> DailyObservation. Streng form først, tolerant etterpå.
pub fn map_day(v: &Value) -> Option<DailyObservation> {
    let mut track = spte::Track::new();
    let de = spte::Deserializer::new(v, &mut track);
    match DayInStrict::deserialize(de) {
        Ok(strict) => Some(strict.to_observation()),
        Err(e) => {
            log::debug!("strict day parse failed at {}: {e}", track.path());
            v.as_object().and_then(map_day_tolerant)
        }
    }
}

fn map_recommendation(s: &str, score: f64) -> Recommendation {
    let lower = s.to_lowercase();
    if lower.contains("excellent") {
        Recommendation::Excellent
    } else if lower.contains("good") {
        Recommendation::Good
    } else if lower.contains("fair") || lower.contains("moderate") {
        Recommendation::Fair
    } else if lower.contains("poor") {
        Recommendation::Poor
    } else {
        Recommendation::from_score(score)
    }
}

/// Summer sannsynlighetene i en risks-blokk ({heavy_rain:{probability},...}).
fn risks_sum(v: &Value) -> Option<f64> {
    let obj = v.as_object()?;
    let mut sum = 0.0;
    let mut hits = 0usize;
    for entry in obj.values() {
        let p = match entry {
            Value::Object(o) => pick_num(o, &["probability", "average"]),
            other => num(other),
        };
        if let Some(p) = p {
            sum += p;
            hits += 1;
        }
    }
    (hits > 0).then_some(sum)
}

/// Én scoret dagspost. Manglende score faller til nøytral 50.
fn map_scored(v: &Value) -> Option<ScoredCandidate> {
    let day = map_day(v)?;
    let obj = v.as_object()?;

    let score = pick_num(
        obj,
        &[
            "safetyScore",
            "safety_score",
            "suitabilityScore",
            "suitability_score",
            "weatherScore",
            "weather_score",
            "score",
        ],
    )
    .unwrap_or(50.0)
    .clamp(0.0, 100.0);

    let factors = pick(obj, &["safetyFactors", "safety_factors", "factors"])
        .and_then(Value::as_array)
        .map(|xs| {
            xs.iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    let recommendation = pick_str(obj, &["recommendation"])
        .map(|s| map_recommendation(s, score))
        .unwrap_or_else(|| Recommendation::from_score(score));

    let overall_risk = pick_num(obj, &["overallRisk", "overall_risk"])
        .or_else(|| pick(obj, &["risks"]).and_then(risks_sum))
        .unwrap_or(100.0 - score);

    let comfort = pick_num(obj, &["comfortIndex", "comfort_index"])
        .unwrap_or_else(|| comfort_index(day.temperature_c, day.humidity_pct));

    Some(ScoredCandidate {
        day,
        safety_score: score,
        safety_factors: factors,
        recommendation,
        overall_risk,
        comfort_index: comfort,
    })
}

fn map_scored_array(v: &Value) -> Vec<ScoredCandidate> {
    v.as_array()
        .map(|xs| xs.iter().filter_map(map_scored).collect())
        .unwrap_or_default()
}

/// Dagsposter fra en ren JSON-liste.
pub fn map_days(v: &Value) -> Vec<DailyObservation> {
    v.as_array()
        .map(|xs| xs.iter().filter_map(map_day).collect())
        .unwrap_or_default()
}

/// Plukk ut rene dagsobservasjoner fra et vilkårlig svar. Brukes av
/// HTTP-klienten til å mappe backendens daily_analysis-liste.
pub fn extract_days(raw: &Value) -> Vec<DailyObservation> {
    if raw.is_array() {
        return map_days(raw);
    }
    let Some(obj) = raw.as_object() else {
        return Vec::new();
    };
    let keys = [
        "dailyAnalysis",
        "daily_analysis",
        "weatherWindows",
        "weather_windows",
        "predictions",
        "bestDays",
        "best_days",
        "days",
    ];
    for k in keys {
        if let Some(arr) = obj.get(k).and_then(Value::as_array) {
            let days: Vec<DailyObservation> = arr.iter().filter_map(map_day).collect();
            if !days.is_empty() {
                return days;
            }
        }
    }
    Vec::new()
}

fn map_risk_level(s: &str) -> RiskLevel {
    match s.trim().to_lowercase().as_str() {
        "low" | "minimal" => RiskLevel::Low,
        "medium" | "moderate" => RiskLevel::Medium,
        "high" | "extreme" => RiskLevel::High,
        _ => RiskLevel::Unknown,
    }
}

fn map_window(obj: &Map<String, Value>) -> Option<WeatherWindowSummary> {
    let v = pick(
        obj,
        &["weatherWindow", "weather_window_summary", "weatherWindowSummary", "weather_window"],
    )?;
    let w = v.as_object()?;
    Some(WeatherWindowSummary {
        total_days: pick_num(w, &["totalDays", "total_days"]).unwrap_or(0.0).max(0.0) as usize,
        suitable_days: pick_num(w, &["suitableDays", "suitable_days"])
            .unwrap_or(0.0)
            .max(0.0) as usize,
        risk_level: pick_str(w, &["riskLevel", "risk_level"])
            .map(map_risk_level)
            .unwrap_or_default(),
    })
}

fn pick_bool(obj: &Map<String, Value>, keys: &[&str]) -> bool {
    pick(obj, keys).and_then(Value::as_bool).unwrap_or(false)
}

fn map_flags(obj: &Map<String, Value>) -> Option<ThresholdFlags> {
    let v = pick(obj, &["thresholdAnalysis", "threshold_analysis"])?;
    let f = v.as_object()?;
    Some(ThresholdFlags {
        very_hot: pick_bool(f, &["veryHot", "very_hot"]),
        very_cold: pick_bool(f, &["veryCold", "very_cold"]),
        very_windy: pick_bool(f, &["veryWindy", "very_windy"]),
        very_wet: pick_bool(f, &["veryWet", "very_wet"]),
        very_uncomfortable: pick_bool(f, &["veryUncomfortable", "very_uncomfortable"]),
    })
}

/// Tall eller nestet {average}/{average_daily}/{probability}-objekt.
fn avg_entry(obj: &Map<String, Value>, keys: &[&str]) -> f64 {
    match pick(obj, keys) {
        Some(Value::Object(o)) => {
            pick_num(o, &["average", "average_daily", "averageDaily", "probability"]).unwrap_or(0.0)
        }
        Some(other) => num(other).unwrap_or(0.0),
        None => 0.0,
    }
}

fn map_avg_conditions(obj: &Map<String, Value>) -> Option<AverageConditions> {
    let v = pick(obj, &["averageConditions", "average_conditions", "conditions"])?;
    let c = v.as_object()?;
    Some(AverageConditions {
        temperature_c: avg_entry(c, &["temperature", "temperature_c"]),
        precipitation_mm: avg_entry(c, &["precipitation", "precipitation_mm"]),
        wind_kmh: avg_entry(c, &["windKmh", "wind_kmh", "windSpeed", "wind_speed"]),
        humidity_pct: avg_entry(c, &["humidity", "humidity_pct"]),
    })
}

fn map_avg_risks(obj: &Map<String, Value>) -> Option<AverageRisks> {
    let v = pick(obj, &["averageRisks", "average_risks", "risks"])?;
    let r = v.as_object()?;
    Some(AverageRisks {
        heavy_rain: avg_entry(r, &["heavyRain", "heavy_rain"]),
        temperature_extreme: avg_entry(r, &["temperatureExtreme", "temperature_extreme"]),
        strong_wind: avg_entry(r, &["strongWind", "strong_winds", "strong_wind"]),
    })
}

fn map_location(obj: &Map<String, Value>) -> String {
    match pick(obj, &["location"]) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(o)) => {
            if let Some(name) = pick_str(o, &["name", "locationName", "location_name"]) {
                name.to_owned()
            } else {
                match (
                    pick_num(o, &["latitude", "lat"]),
                    pick_num(o, &["longitude", "lon", "lng"]),
                ) {
                    (Some(lat), Some(lon)) => format!("{lat:.2}, {lon:.2}"),
                    _ => String::new(),
                }
            }
        }
        _ => String::new(),
    }
}

fn map_date_range(obj: &Map<String, Value>) -> String {
    if let Some(s) = pick_str(obj, &["dateRange", "date_range"]) {
        return s.to_owned();
    }
    let from = pick_str(obj, &["startDate", "start_date", "dateFrom", "date_from"]);
    let to = pick_str(obj, &["endDate", "end_date", "dateTo", "date_to"]);
    match (from, to) {
        (Some(a), Some(b)) => format!("{a} to {b}"),
        _ => String::new(),
    }
}

/// Normaliser et vilkårlig svar til kanonisk AnalysisResult.
///
/// Garantier: feiler aldri; best_days er alltid en liste; weather_window har
/// alltid numeriske tellere og et risikonivå; camelCase foretrekkes når
/// begge nøkkelvarianter finnes.
pub fn normalize_results(raw: &Value) -> AnalysisResult {
    let Some(obj) = raw.as_object() else {
        log::debug!("normalize_results: input er ikke et objekt");
        return AnalysisResult {
            error: Some("non_object_input".into()),
            ..AnalysisResult::default()
        };
    };

    let mut best_days = pick(obj, &["bestDays", "best_days"])
        .map(map_scored_array)
        .unwrap_or_default();

    // Hele vinduet (daily_analysis-form) – brukes til å regne ut det som mangler.
    let daily = pick(
        obj,
        &["dailyAnalysis", "daily_analysis", "weatherWindows", "weather_windows", "predictions", "days"],
    )
    .map(map_scored_array)
    .unwrap_or_default();

    if best_days.is_empty() {
        let top = pick(obj, &["topRecommendations", "top_recommendations"])
            .map(map_scored_array)
            .unwrap_or_default();
        best_days = if top.is_empty() && !daily.is_empty() {
            let mut sorted = daily.clone();
            sorted.sort_by(|a, b| {
                b.safety_score
                    .partial_cmp(&a.safety_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            sorted.truncate(crate::analysis::BEST_DAYS_LIMIT);
            sorted
        } else {
            top
        };
    }

    let daily_obs: Vec<DailyObservation> = daily.iter().map(|c| c.day.clone()).collect();

    let weather_window = map_window(obj).unwrap_or_else(|| {
        if daily.is_empty() {
            WeatherWindowSummary::default()
        } else {
            window_summary(&daily)
        }
    });

    let threshold_analysis = map_flags(obj).unwrap_or_else(|| {
        if daily_obs.is_empty() {
            ThresholdFlags::default()
        } else {
            threshold_flags(&daily_obs)
        }
    });

    let avg_conditions = map_avg_conditions(obj).unwrap_or_else(|| {
        if daily_obs.is_empty() {
            AverageConditions::default()
        } else {
            average_conditions(&daily_obs)
        }
    });

    let avg_risks = map_avg_risks(obj).unwrap_or_default();

    let mut sources: Vec<String> = pick(
        obj,
        &["nasaDataSources", "nasa_data_sources", "dataSources", "data_sources"],
    )
    .and_then(Value::as_array)
    .map(|xs| {
        xs.iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default();

    if let Some(Value::Object(meth)) = pick(obj, &["methodology"]) {
        if let Some(src) = pick_str(meth, &["dataSource", "data_source"]) {
            sources.push(src.to_owned());
        }
    }

    AnalysisResult {
        best_days,
        weather_window,
        threshold_analysis,
        average_conditions: avg_conditions,
        average_risks: avg_risks,
        nasa_data_sources: sources,
        location: map_location(obj),
        date_range: map_date_range(obj),
        confidence: pick_num(obj, &["confidence", "confidenceScore", "confidence_score"])
            .unwrap_or(0.0)
            .clamp(0.0, 100.0),
        error: pick_str(obj, &["error"]).map(str::to_owned),
    }
}

/// Som normalize_results, men fra rå JSON-tekst. Parsefeil gir default-form
/// med error satt – aldri panikk, aldri Err.
pub fn normalize_results_str(json: &str) -> AnalysisResult {
    match serde_json::from_str::<Value>(json) {
        Ok(v) => normalize_results(&v),
        Err(e) => {
            log::debug!("normalize_results_str: ugyldig JSON: {e}");
            AnalysisResult {
                error: Some("invalid_json_input".into()),
                ..AnalysisResult::default()
            }
        }
    }
}
