// core/src/metrics.rs
use prometheus::{IntCounter, Registry};

/// Tellere for datakilde-helse. Registreres i eget registry slik at verten
/// kan eksponere dem der den vil.
pub struct Metrics {
    pub registry: Registry,
    backend_fetch_ok: IntCounter,
    backend_fetch_failed: IntCounter,
    synthetic_fallback: IntCounter,
    source_cache_hit: IntCounter,
    source_cache_miss: IntCounter,
}

fn counter(registry: &Registry, name: &str, help: &str) -> IntCounter {
    let c = IntCounter::new(name, help).expect("static counter opts are valid");
    // Dobbel registrering skal ikke kunne skje (ett registry per Metrics).
    registry.register(Box::new(c.clone())).ok();
    c
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        Self {
            backend_fetch_ok: counter(
                &registry,
                "weather_backend_fetch_ok_total",
                "Vellykkede svar fra backend",
            ),
            backend_fetch_failed: counter(
                &registry,
                "weather_backend_fetch_failed_total",
                "Feilede backend-kall (nett, HTTP eller parse)",
            ),
            synthetic_fallback: counter(
                &registry,
                "weather_synthetic_fallback_total",
                "Analyser som falt tilbake til syntetisk generator",
            ),
            source_cache_hit: counter(
                &registry,
                "weather_source_cache_hit_total",
                "Treff i vindu-cachen",
            ),
            source_cache_miss: counter(
                &registry,
                "weather_source_cache_miss_total",
                "Bom i vindu-cachen",
            ),
            registry,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

pub fn backend_fetch_ok_total(m: &Metrics) -> &IntCounter {
    &m.backend_fetch_ok
}

pub fn backend_fetch_failed_total(m: &Metrics) -> &IntCounter {
    &m.backend_fetch_failed
}

pub fn synthetic_fallback_total(m: &Metrics) -> &IntCounter {
    &m.synthetic_fallback
}

pub fn source_cache_hit_total(m: &Metrics) -> &IntCounter {
    &m.source_cache_hit
}

pub fn source_cache_miss_total(m: &Metrics) -> &IntCounter {
    &m.source_cache_miss
}
