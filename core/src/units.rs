// core/src/units.rs

/// m/s -> km/t.
pub const MS_TO_KMH: f64 = 3.6;

// --- RoundTo trait (offentlig, brukt ved bygging av resultater) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 {
            return self.round();
        }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// Enhetsmerke for rå vindverdier. Konvertering skjer nøyaktig én gang,
/// her – aldri hos kalleren (vern mot dobbeltkonvertering ved merge).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindUnit {
    Ms,
    Kmh,
}

#[inline]
pub fn wind_to_kmh(value: f64, unit: WindUnit) -> f64 {
    match unit {
        WindUnit::Ms => value * MS_TO_KMH,
        WindUnit::Kmh => value,
    }
}

/// Følt temperatur: vindkjøling under 10 °C, enkel varmeindeks over 20 °C.
/// Grov tilnærming, ikke meteorologi – mellomsonen returnerer lufttemperatur.
pub fn apparent_temperature(temp_c: f64, wind_kmh: f64, humidity_pct: Option<f64>) -> f64 {
    if temp_c <= 10.0 && wind_kmh > 4.8 {
        let v = wind_kmh.powf(0.16);
        return 13.12 + 0.6215 * temp_c - 11.37 * v + 0.3965 * temp_c * v;
    }
    if temp_c >= 20.0 {
        let h = humidity_pct.unwrap_or(50.0);
        return temp_c + (h - 50.0) * 0.1;
    }
    temp_c
}

/// Komfortindeks 0–100 fra temperatur og fuktighet.
/// Manglende fuktighet behandles som nøytral (50).
pub fn comfort_index(temp_c: f64, humidity_pct: Option<f64>) -> f64 {
    let h = humidity_pct.unwrap_or(50.0);

    if temp_c < 20.0 {
        return (50.0 - (20.0 - temp_c).abs() * 2.0).max(0.0);
    }

    let comfort = if (20.0..=25.0).contains(&temp_c) && (40.0..=60.0).contains(&h) {
        100.0 - (22.5 - temp_c).abs() * 5.0 - (50.0 - h).abs() * 0.5
    } else {
        80.0 - (22.5 - temp_c).abs() * 3.0 - (50.0 - h).abs() * 0.3
    };

    comfort.clamp(0.0, 100.0)
}
