// core/tests/test_scanner.rs
use std::cell::Cell;
use std::collections::HashSet;

use chrono::NaiveDate;
use paradeguard_core::types::{ActivityType, DailyObservation};
use paradeguard_core::{
    build_candidate_pool, scan_alternatives, CancelToken, ScanConfig, ScanInputs, ScanOutcome,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
}

/// Syntetisk-men-deterministisk datasett: temperatur og regn varierer med
/// dagsindeksen slik at scorene blir ulike.
fn make_days(n: usize) -> Vec<DailyObservation> {
    (0..n)
        .map(|i| DailyObservation {
            date: today() + chrono::Duration::days(i as i64),
            temperature_c: 18.0 + (i % 15) as f64,
            precipitation_mm: (i % 7) as f64 * 2.0,
            wind_kmh: 8.0 + (i % 9) as f64 * 3.0,
            humidity_pct: Some(45.0 + (i % 5) as f64 * 8.0),
            cloud_cover_pct: None,
            uv_index: None,
        })
        .collect()
}

fn inputs<'a>(
    days: &'a [DailyObservation],
    external: &'a [DailyObservation],
    config: ScanConfig,
) -> ScanInputs<'a> {
    ScanInputs {
        days,
        external,
        activity: ActivityType::General,
        today: today(),
        config,
    }
}

#[test]
fn test_pool_is_capped_and_prefiltered() {
    let mut days = make_days(300);
    // to håpløse dager: langt under og langt over General-båndet (15–30)
    days[0].temperature_c = -30.0;
    days[1].temperature_c = 55.0;

    let config = ScanConfig {
        search_range_days: 400,
        ..ScanConfig::default()
    };
    let pool = build_candidate_pool(&days, ActivityType::General, today(), &config);

    assert!(pool.len() <= config.pool_cap);
    assert!(pool.iter().all(|d| d.temperature_c >= 0.0 && d.temperature_c <= 40.0));
}

#[test]
fn test_pool_falls_back_to_full_dataset_when_horizon_empty() {
    // alle dager ligger FØR today => horisontfilteret gir tomt utvalg
    let days: Vec<_> = make_days(10)
        .into_iter()
        .map(|mut d| {
            d.date = d.date - chrono::Duration::days(365);
            d
        })
        .collect();

    let pool = build_candidate_pool(&days, ActivityType::General, today(), &ScanConfig::default());
    assert!(!pool.is_empty(), "tom horisont skal falle tilbake til hele datasettet");
}

#[test]
fn test_final_result_bounded_sorted_and_subset() {
    let days = make_days(120);
    let external = vec![DailyObservation {
        date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        temperature_c: 22.0,
        precipitation_mm: 0.0,
        wind_kmh: 10.0,
        humidity_pct: Some(50.0),
        cloud_cover_pct: None,
        uv_index: None,
    }];

    let scan_inputs = inputs(&days, &external, ScanConfig::default());
    let token = CancelToken::new();
    let report = scan_alternatives(&scan_inputs, &token, || {}, |_| {});

    assert_eq!(report.outcome, ScanOutcome::Completed);
    assert!(report.best.len() <= 40, "aldri mer enn topp-K");

    // sortert synkende på score
    for pair in report.best.windows(2) {
        assert!(pair[0].safety_score >= pair[1].safety_score);
    }

    // delmengde av pool + eksterne forslag
    let allowed: HashSet<NaiveDate> = days
        .iter()
        .map(|d| d.date)
        .chain(external.iter().map(|d| d.date))
        .collect();
    assert!(report.best.iter().all(|c| allowed.contains(&c.day.date)));
}

#[test]
fn test_merge_dedupes_by_date() {
    let days = make_days(30);
    // ett eksternt forslag med dato som allerede finnes, ett nytt
    let external = vec![days[3].clone(), {
        let mut d = days[3].clone();
        d.date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        d
    }];

    let scan_inputs = inputs(&days, &external, ScanConfig::default());
    let token = CancelToken::new();
    let report = scan_alternatives(&scan_inputs, &token, || {}, |_| {});

    let mut seen = HashSet::new();
    for c in &report.best {
        assert!(seen.insert(c.day.date), "duplisert dato i resultatet: {}", c.day.date);
    }
    assert!(report
        .best
        .iter()
        .any(|c| c.day.date == NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
}

#[test]
fn test_completed_scan_always_publishes_final() {
    let days = make_days(50);
    let scan_inputs = inputs(&days, &[], ScanConfig::default());
    let token = CancelToken::new();

    let publishes = Cell::new(0usize);
    let report = scan_alternatives(&scan_inputs, &token, || {}, |partial| {
        publishes.set(publishes.get() + 1);
        assert!(partial.len() <= 40);
    });

    assert!(publishes.get() >= 1, "fullført skann publiserer alltid minst én gang");
    assert_eq!(report.outcome, ScanOutcome::Completed);
}

#[test]
fn test_cancellation_stops_all_further_publications() {
    let days = make_days(150);
    // små bolker slik at vi garantert får flere yield-punkter
    let config = ScanConfig {
        batch_initial: 8,
        batch_max: 8,
        batch_grow: 0,
        ..ScanConfig::default()
    };
    let scan_inputs = inputs(&days, &[], config);
    let token = CancelToken::new();

    // unmount-analogen: kanseller ved første yield-punkt
    let publishes_after_cancel = Cell::new(0usize);
    let token_for_yield = token.clone();
    let report = scan_alternatives(
        &scan_inputs,
        &token,
        || token_for_yield.cancel(),
        |_| {
            if token.is_cancelled() {
                publishes_after_cancel.set(publishes_after_cancel.get() + 1);
            }
        },
    );

    assert_eq!(report.outcome, ScanOutcome::Aborted);
    assert_eq!(
        publishes_after_cancel.get(),
        0,
        "ingen publisering etter at tokenet er hevet"
    );
    assert!(report.scored < 150, "avbrutt skann skal ikke ha scoret hele poolen");
}

#[test]
fn test_pre_cancelled_token_publishes_nothing() {
    let days = make_days(60);
    let scan_inputs = inputs(&days, &[], ScanConfig::default());
    let token = CancelToken::new();
    token.cancel();

    let publishes = Cell::new(0usize);
    let report = scan_alternatives(&scan_inputs, &token, || {}, |_| {
        publishes.set(publishes.get() + 1);
    });

    assert_eq!(report.outcome, ScanOutcome::Aborted);
    assert_eq!(publishes.get(), 0);
    assert_eq!(report.scored, 0);
    assert!(report.best.is_empty());
}

#[test]
fn test_scan_is_deterministic() {
    let days = make_days(90);
    let token = CancelToken::new();

    let a = scan_alternatives(&inputs(&days, &[], ScanConfig::default()), &token, || {}, |_| {});
    let b = scan_alternatives(&inputs(&days, &[], ScanConfig::default()), &token, || {}, |_| {});

    let scores_a: Vec<f64> = a.best.iter().map(|c| c.safety_score).collect();
    let scores_b: Vec<f64> = b.best.iter().map(|c| c.safety_score).collect();
    assert_eq!(scores_a, scores_b);

    let dates_a: Vec<NaiveDate> = a.best.iter().map(|c| c.day.date).collect();
    let dates_b: Vec<NaiveDate> = b.best.iter().map(|c| c.day.date).collect();
    assert_eq!(dates_a, dates_b);
}
