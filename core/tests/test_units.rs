// core/tests/test_units.rs
use paradeguard_core::{
    apparent_temperature, comfort_index, map_day, wind_to_kmh, RoundTo, WindUnit, MS_TO_KMH,
};
use serde_json::json;

#[test]
fn test_ms_to_kmh_is_exact() {
    assert_eq!(MS_TO_KMH, 3.6);
    assert_eq!(wind_to_kmh(10.0, WindUnit::Ms), 36.0);
    assert_eq!(wind_to_kmh(0.0, WindUnit::Ms), 0.0);
    // km/t-merkede verdier passerer urørt
    assert_eq!(wind_to_kmh(36.0, WindUnit::Kmh), 36.0);
}

#[test]
fn test_conversion_applied_exactly_once_in_mapping() {
    // m/s-merket nøkkel: konverteres én gang
    let ms = map_day(&json!({
        "date": "2025-07-01", "temperature": 20.0, "wind_speed": 10.0
    }))
    .expect("kunne ikke mappe m/s-dag");
    assert_eq!(ms.wind_kmh, 36.0);

    // km/t-merket nøkkel: ingen konvertering
    let kmh = map_day(&json!({
        "date": "2025-07-01", "temperature": 20.0, "wind_kmh": 36.0
    }))
    .expect("kunne ikke mappe km/t-dag");
    assert_eq!(kmh.wind_kmh, 36.0);

    // begge til stede: km/t-nøkkelen vinner, fortsatt ingen dobbeltkonvertering
    let both = map_day(&json!({
        "date": "2025-07-01", "temperature": 20.0,
        "wind_kmh": 36.0, "wind_speed": 10.0
    }))
    .expect("kunne ikke mappe dag med begge nøkler");
    assert_eq!(both.wind_kmh, 36.0);

    // re-mapping av et allerede normalisert objekt endrer ikke verdien
    let serialized = serde_json::to_value(&both).unwrap();
    let remapped = map_day(&serialized).expect("kunne ikke re-mappe");
    assert_eq!(remapped.wind_kmh, 36.0);
}

#[test]
fn test_apparent_temperature_wind_chill() {
    // kaldt + vind => føles kaldere
    let felt = apparent_temperature(0.0, 30.0, None);
    assert!(felt < 0.0, "vindkjøling skal trekke ned: {felt}");

    // vindstille kulde: ingen justering
    assert_eq!(apparent_temperature(0.0, 0.0, None), 0.0);
}

#[test]
fn test_apparent_temperature_heat_index() {
    // varmt + fuktig => føles varmere
    let felt = apparent_temperature(30.0, 5.0, Some(90.0));
    assert!(felt > 30.0);

    // varmt + tørt => føles kjøligere
    let dry = apparent_temperature(30.0, 5.0, Some(20.0));
    assert!(dry < 30.0);

    // mellomsonen returnerer lufttemperaturen
    assert_eq!(apparent_temperature(15.0, 10.0, Some(50.0)), 15.0);
}

#[test]
fn test_comfort_index_band() {
    // idealsone: høy komfort
    let ideal = comfort_index(22.5, Some(50.0));
    assert!(ideal >= 95.0);

    // ekstremvarme: lav komfort, aldri negativ
    let harsh = comfort_index(45.0, Some(95.0));
    assert!((0.0..=30.0).contains(&harsh));

    // manglende fuktighet behandles som nøytral
    assert_eq!(comfort_index(22.5, None), comfort_index(22.5, Some(50.0)));
}

#[test]
fn test_round_to() {
    assert_eq!(3.14159.round_to(2), 3.14);
    assert_eq!(3.14159.round_to(0), 3.0);
    // halve rundes bort fra null
    assert_eq!((-1.25).round_to(1), -1.3);
}
