// core/src/source.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde_json::Value;
use ureq::Agent;

use crate::metrics::{
    backend_fetch_failed_total, backend_fetch_ok_total, source_cache_hit_total,
    source_cache_miss_total, synthetic_fallback_total, Metrics,
};
use crate::normalize::extract_days;
use crate::synth::synth_window;
use crate::types::{AnalysisRequest, DailyObservation};

/// Standard backend-adresse (Flask-tjenesten i utviklingsmiljøet).
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5001";

/// Ett hentet vindu med opphav og tillit.
#[derive(Debug, Clone)]
pub struct FetchedWindow {
    pub days: Vec<DailyObservation>,
    pub source: String,
    pub confidence: f64,
}

/// Datakilde for dagsobservasjoner. None betyr "ikke tilgjengelig" –
/// kjeden går da videre til neste kilde.
pub trait WeatherDataSource {
    fn fetch_window(&self, req: &AnalysisRequest) -> Option<FetchedWindow>;
}

// ── HTTP-klient mot backend ──────────────────────────────────────────────

/// Backend-klient – enkel blocking-versjon (ureq) med eksplisitt timeout.
pub struct BackendClient {
    agent: Agent,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        // En enkel agent; ureq bruker rustls når "tls" er aktivert
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        Self {
            agent,
            base_url: base_url.into(),
        }
    }
}

impl Default for BackendClient {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

impl WeatherDataSource for BackendClient {
    fn fetch_window(&self, req: &AnalysisRequest) -> Option<FetchedWindow> {
        let url = format!("{}/api/weather-windows", self.base_url);
        let body = serde_json::json!({
            "latitude": req.latitude,
            "longitude": req.longitude,
            "start_date": req.date_from.format("%Y-%m-%d").to_string(),
            "end_date": req.date_to.format("%Y-%m-%d").to_string(),
            "activity_type": req.activity.id(),
        });

        let resp = match self.agent.post(&url).send_json(body) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("backend unavailable ({url}): {e}");
                return None;
            }
        };

        let raw: Value = match resp.into_json() {
            Ok(v) => v,
            Err(e) => {
                log::warn!("backend response was not JSON: {e}");
                return None;
            }
        };

        let days = extract_days(&raw);
        if days.is_empty() {
            log::warn!("backend response contained no usable daily records");
            return None;
        }

        log::info!(
            "[backend] {} days for {:.2},{:.2}",
            days.len(),
            req.latitude,
            req.longitude
        );

        Some(FetchedWindow {
            days,
            source: format!("{}/api/weather-windows", self.base_url),
            confidence: 80.0,
        })
    }
}

// ── Syntetisk kilde (total – svarer alltid) ──────────────────────────────

#[derive(Debug, Default)]
pub struct SyntheticSource;

impl WeatherDataSource for SyntheticSource {
    fn fetch_window(&self, req: &AnalysisRequest) -> Option<FetchedWindow> {
        Some(FetchedWindow {
            days: synth_window(req),
            source: "synthetic climate model".into(),
            confidence: 50.0,
        })
    }
}

// ── Statisk kilde (test-søm, samme rolle som en lokal fixture) ───────────

#[derive(Debug, Default)]
pub struct StaticSource {
    pub days: Vec<DailyObservation>,
    pub confidence: f64,
}

impl WeatherDataSource for StaticSource {
    fn fetch_window(&self, _req: &AnalysisRequest) -> Option<FetchedWindow> {
        if self.days.is_empty() {
            return None;
        }
        Some(FetchedWindow {
            days: self.days.clone(),
            source: "static dataset".into(),
            confidence: if self.confidence > 0.0 {
                self.confidence
            } else {
                100.0
            },
        })
    }
}

// ── Kjede med cache: backend -> syntetisk ────────────────────────────────

type CacheKey = (OrderedFloat<f64>, OrderedFloat<f64>, NaiveDate, NaiveDate);

/// Fallback-kjeden. Syntetisk kilde er total, så fetch_window her
/// returnerer alltid Some for en gyldig forespørsel.
pub struct SourceChain {
    backend: Option<BackendClient>,
    synthetic: SyntheticSource,
    cache: Arc<Mutex<HashMap<CacheKey, FetchedWindow>>>,
    metrics: Arc<Metrics>,
}

impl SourceChain {
    pub fn new(backend: Option<BackendClient>, metrics: Arc<Metrics>) -> Self {
        Self {
            backend,
            synthetic: SyntheticSource,
            cache: Arc::new(Mutex::new(HashMap::new())),
            metrics,
        }
    }

    /// Kjede uten backend – kun deterministisk syntetisk generator.
    pub fn synthetic_only(metrics: Arc<Metrics>) -> Self {
        Self::new(None, metrics)
    }

    pub fn with_backend(base_url: impl Into<String>, metrics: Arc<Metrics>) -> Self {
        Self::new(Some(BackendClient::new(base_url)), metrics)
    }
}

impl WeatherDataSource for SourceChain {
    fn fetch_window(&self, req: &AnalysisRequest) -> Option<FetchedWindow> {
        let key: CacheKey = (
            OrderedFloat(req.latitude),
            OrderedFloat(req.longitude),
            req.date_from,
            req.date_to,
        );

        {
            let cache = self.cache.lock().unwrap();
            if let Some(hit) = cache.get(&key) {
                source_cache_hit_total(&self.metrics).inc();
                return Some(hit.clone());
            }
        }
        source_cache_miss_total(&self.metrics).inc();

        // 1) Prøv backend (nett)
        let fetched = match self.backend.as_ref().and_then(|b| b.fetch_window(req)) {
            Some(w) => {
                backend_fetch_ok_total(&self.metrics).inc();
                w
            }
            // 2) Fallback til syntetisk generator
            None => {
                if self.backend.is_some() {
                    backend_fetch_failed_total(&self.metrics).inc();
                }
                synthetic_fallback_total(&self.metrics).inc();
                self.synthetic.fetch_window(req)?
            }
        };

        self.cache.lock().unwrap().insert(key, fetched.clone());
        Some(fetched)
    }
}
