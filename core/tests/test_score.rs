// core/tests/test_score.rs
use chrono::NaiveDate;
use paradeguard_core::thresholds::thresholds_for;
use paradeguard_core::types::{ActivityType, DailyObservation, Recommendation};
use paradeguard_core::{score_candidate, suitability_score};

fn make_day(temp: f64, rain: f64, wind: f64, humidity: Option<f64>) -> DailyObservation {
    DailyObservation {
        date: NaiveDate::from_ymd_opt(2025, 7, 12).unwrap(),
        temperature_c: temp,
        precipitation_mm: rain,
        wind_kmh: wind,
        humidity_pct: humidity,
        cloud_cover_pct: None,
        uv_index: None,
    }
}

#[test]
fn test_perfect_day_scores_100() {
    let thr = thresholds_for(ActivityType::Wedding);
    let (score, factors) = suitability_score(&make_day(24.0, 0.0, 10.0, Some(50.0)), &thr);
    assert_eq!(score, 100.0);
    assert!(factors.is_empty(), "ingen faktorer på perfekt dag: {factors:?}");
}

#[test]
fn test_score_clamped_at_extremes() {
    let thr = thresholds_for(ActivityType::Wedding);

    // 1000 °C skal aldri gi negativ score
    let (score, factors) = suitability_score(&make_day(1000.0, 0.0, 0.0, None), &thr);
    assert_eq!(score, 0.0);
    assert!(factors.iter().any(|f| f.starts_with("Too hot")));

    // og aldri over 100 uansett hvor snilt været er
    let (score, _) = suitability_score(&make_day(23.0, 0.0, 0.0, Some(50.0)), &thr);
    assert!(score <= 100.0);
}

#[test]
fn test_boundary_equality_gives_no_penalty() {
    // Straff utløses STRENGT over grensen – likhet er gratis.
    let thr = thresholds_for(ActivityType::Wedding);

    let (score, factors) =
        suitability_score(&make_day(thr.max_temp_c, thr.max_rain_mm, thr.max_wind_kmh, Some(80.0)), &thr);
    assert_eq!(score, 100.0, "grenselikhet skal ikke straffes");
    assert!(factors.is_empty());

    // ... men rett over grensen straffes det
    let (score, factors) = suitability_score(&make_day(thr.max_temp_c + 0.1, 0.0, 0.0, None), &thr);
    assert!(score < 100.0);
    assert_eq!(factors.len(), 1);
}

#[test]
fn test_scoring_is_idempotent() {
    let thr = thresholds_for(ActivityType::Hiking);
    let day = make_day(31.5, 18.0, 44.0, Some(93.0));

    let (s1, f1) = suitability_score(&day, &thr);
    let (s2, f2) = suitability_score(&day, &thr);
    assert_eq!(s1, s2);
    assert_eq!(f1, f2, "faktorlisten skal være stabil, i samme rekkefølge");
}

#[test]
fn test_missing_fields_do_not_penalize() {
    // Manglende fuktighet oppfyller kravet – ingen straff, ingen panikk.
    let thr = thresholds_for(ActivityType::Wedding);
    let with = suitability_score(&make_day(24.0, 0.0, 10.0, Some(95.0)), &thr).0;
    let without = suitability_score(&make_day(24.0, 0.0, 10.0, None), &thr).0;
    assert!(with < 100.0);
    assert_eq!(without, 100.0);
}

#[test]
fn test_weights_differ_per_activity() {
    // 10 mm regn: over bryllupsgrensen (5), godt under jordbruksgrensen (40).
    let day = make_day(24.0, 10.0, 10.0, Some(50.0));

    let wedding = suitability_score(&day, &thresholds_for(ActivityType::Wedding)).0;
    let farming = suitability_score(&day, &thresholds_for(ActivityType::Farming)).0;
    assert!(wedding < farming);
    assert_eq!(farming, 100.0);
    // bryllup: (10-5) * 5 = 25 poeng
    assert_eq!(wedding, 75.0);
}

#[test]
fn test_penalty_factor_texts() {
    let thr = thresholds_for(ActivityType::Wedding);
    let (_, factors) = suitability_score(&make_day(33.0, 12.0, 40.0, Some(95.0)), &thr);

    assert_eq!(factors.len(), 4);
    assert!(factors[0].starts_with("Too hot ("));
    assert!(factors[1].starts_with("Rain above limit ("));
    assert!(factors[2].starts_with("Too windy ("));
    assert!(factors[3].starts_with("Too humid ("));
    assert!(factors.iter().all(|f| f.ends_with(" points)")));
}

#[test]
fn test_recommendation_classes() {
    let thr = thresholds_for(ActivityType::Wedding);

    let excellent = score_candidate(&make_day(24.0, 0.0, 10.0, Some(50.0)), &thr);
    assert_eq!(excellent.recommendation, Recommendation::Excellent);

    let poor = score_candidate(&make_day(45.0, 30.0, 80.0, Some(98.0)), &thr);
    assert_eq!(poor.recommendation, Recommendation::Poor);
    assert_eq!(poor.safety_score, 0.0);
    // komponentrisikoene er med i kandidaten
    assert!(poor.overall_risk > 100.0);
}

#[test]
fn test_component_risks_model() {
    let thr = thresholds_for(ActivityType::Wedding);

    // rolig dag: ingen risiko
    let calm = score_candidate(&make_day(24.0, 0.0, 10.0, Some(50.0)), &thr);
    assert_eq!(calm.overall_risk, 0.0);

    // regn på grensen av maks: regnrisiko metter på 100
    let wet = score_candidate(&make_day(24.0, 50.0, 10.0, Some(50.0)), &thr);
    assert!(wet.overall_risk >= 100.0);
    assert!(wet.overall_risk <= 300.0);
}
