use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aktivitetstype – velger hvilket komfortbånd og vekttabell som gjelder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Wedding,
    Hiking,
    Farming,
    Festival,
    General,
    Custom,
}

impl ActivityType {
    /// Tolerant oppslag fra id-streng. Ukjent id => General.
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_lowercase().as_str() {
            "wedding" => Self::Wedding,
            "hiking" => Self::Hiking,
            "farming" => Self::Farming,
            "festival" => Self::Festival,
            "custom" => Self::Custom,
            _ => Self::General,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Wedding => "wedding",
            Self::Hiking => "hiking",
            Self::Farming => "farming",
            Self::Festival => "festival",
            Self::General => "general",
            Self::Custom => "custom",
        }
    }
}

impl Default for ActivityType {
    fn default() -> Self {
        Self::General
    }
}

/// Forespørsel om analyse av et værvindu.
/// Invariant: date_from < date_to (strengt) – valideres i analysis.rs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub location_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub activity: ActivityType,
}

/// Ett døgn med værdata – fra backend eller syntetisk generator.
/// Vind lagres alltid i km/t; råverdier i m/s konverteres nøyaktig én gang
/// ved mapping (se units.rs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub precipitation_mm: f64,
    pub wind_kmh: f64,
    #[serde(default)]
    pub humidity_pct: Option<f64>,
    #[serde(default)]
    pub cloud_cover_pct: Option<f64>,
    #[serde(default)]
    pub uv_index: Option<f64>,
}

/// Anbefalingsklasse avledet av score (80/60/40-kutt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Recommendation {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// Samlet risikonivå for hele vinduet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Én scoret dag. Avledet verdi – lages på nytt ved re-scoring, muteres aldri.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub day: DailyObservation,
    /// Egnethetsscore, alltid klemt til [0, 100].
    pub safety_score: f64,
    /// Én tekstlig begrunnelse per brutt dimensjon, i fast rekkefølge.
    pub safety_factors: Vec<String>,
    pub recommendation: Recommendation,
    /// Sum av komponentrisikoene (regn + temperatur + vind), 0–300.
    pub overall_risk: f64,
    pub comfort_index: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherWindowSummary {
    pub total_days: usize,
    pub suitable_days: usize,
    pub risk_level: RiskLevel,
}

/// Fem boolske flagg fra vindu-aggregatene (terskler i thresholds.rs).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdFlags {
    pub very_hot: bool,
    pub very_cold: bool,
    pub very_windy: bool,
    pub very_wet: bool,
    pub very_uncomfortable: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AverageConditions {
    pub temperature_c: f64,
    pub precipitation_mm: f64,
    pub wind_kmh: f64,
    pub humidity_pct: f64,
}

/// Snitt av komponentrisikoene over vinduet (0–100 per komponent).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AverageRisks {
    pub heavy_rain: f64,
    pub temperature_extreme: f64,
    pub strong_wind: f64,
}

/// Kanonisk analyseresultat. Bygges i sin helhet per analyse og erstatter
/// forrige resultat – ingen inkrementell merge på toppnivå.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub best_days: Vec<ScoredCandidate>,
    pub weather_window: WeatherWindowSummary,
    pub threshold_analysis: ThresholdFlags,
    pub average_conditions: AverageConditions,
    pub average_risks: AverageRisks,
    pub nasa_data_sources: Vec<String>,
    pub location: String,
    pub date_range: String,
    pub confidence: f64,
    #[serde(default)]
    pub error: Option<String>,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            best_days: Vec::new(),
            weather_window: WeatherWindowSummary::default(),
            threshold_analysis: ThresholdFlags::default(),
            average_conditions: AverageConditions::default(),
            average_risks: AverageRisks::default(),
            nasa_data_sources: Vec::new(),
            location: String::new(),
            date_range: String::new(),
            confidence: 0.0,
            error: None,
        }
    }
}

/// Ett innslag i "nylige søk"-listen (maks 5, dedup på id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSearch {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}
