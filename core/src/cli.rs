// core/src/cli.rs
use crate::types::AnalysisResult;
use crate::units::apparent_temperature;

/// Kompakt tekstrapport for terminalbruk i verten.
pub fn print_analysis_report(result: &AnalysisResult) {
    println!("--- Weather Window Report ---");
    println!("Location: {}", result.location);
    println!("Range: {}", result.date_range);
    println!(
        "Days: {} total, {} suitable, risk level {:?}",
        result.weather_window.total_days,
        result.weather_window.suitable_days,
        result.weather_window.risk_level
    );

    let f = &result.threshold_analysis;
    println!(
        "Flags: hot={} cold={} windy={} wet={} uncomfortable={}",
        f.very_hot, f.very_cold, f.very_windy, f.very_wet, f.very_uncomfortable
    );

    for (i, day) in result.best_days.iter().enumerate() {
        let feels_like =
            apparent_temperature(day.day.temperature_c, day.day.wind_kmh, day.day.humidity_pct);
        println!(
            "{}. {}  score {:.1}  ({:?})  {:.1}°C (feels like {:.1}°C)",
            i + 1,
            day.day.date,
            day.safety_score,
            day.recommendation,
            day.day.temperature_c,
            feels_like
        );
        for factor in &day.safety_factors {
            println!("     - {factor}");
        }
    }

    if let Some(err) = &result.error {
        println!("⚠️ error: {err}");
    }
    println!("Confidence: {:.0}%  Sources: {}", result.confidence, result.nasa_data_sources.join(", "));
}
