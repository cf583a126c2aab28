// ParadeGuard core: værvindu-analyse for utendørsarrangementer.
// Ren kjerne (scoring, normalisering, aggregering, inkrementell skanner)
// pluss datakilde-kjede med syntetisk fallback. UI-bindingen er en tynn
// JSON-adapter i py/ – ingen logikk der.

pub mod aggregate;
pub mod analysis;
pub mod cli;
pub mod metrics;
pub mod normalize;
pub mod scanner;
pub mod score;
pub mod source;
pub mod storage;
pub mod synth;
pub mod thresholds;
pub mod types;
pub mod units;

#[cfg(feature = "python")]
mod py;

pub use aggregate::{
    average_conditions, average_risks, threshold_flags, window_extremes, window_summary,
};
pub use analysis::{analyze_weather_window, validate_request, AnalysisError, BEST_DAYS_LIMIT};
pub use cli::print_analysis_report;
pub use metrics::Metrics;
pub use normalize::{extract_days, map_day, map_days, normalize_results, normalize_results_str};
pub use scanner::{
    build_candidate_pool, scan_alternatives, CancelToken, ScanConfig, ScanInputs, ScanOutcome,
    ScanReport,
};
pub use score::{component_risks, score_candidate, suitability_score};
pub use source::{
    BackendClient, FetchedWindow, SourceChain, StaticSource, SyntheticSource, WeatherDataSource,
    DEFAULT_BACKEND_URL,
};
pub use storage::{
    push_recent, FileRecentSearchStore, MemoryRecentSearchStore, RecentSearchStore,
    MAX_RECENT_SEARCHES, RECENT_SEARCHES_FILE,
};
pub use synth::{climate_factors, synth_day, synth_window};
pub use thresholds::{thresholds_for, ActivityThresholds, PenaltyWeights};
pub use types::{
    ActivityType, AnalysisRequest, AnalysisResult, AverageConditions, AverageRisks,
    DailyObservation, RecentSearch, Recommendation, RiskLevel, ScoredCandidate, ThresholdFlags,
    WeatherWindowSummary,
};
pub use units::{apparent_temperature, comfort_index, wind_to_kmh, RoundTo, WindUnit, MS_TO_KMH};
