use serde::{Deserialize, Serialize};

/// Constant tag identifying where the numbers come from; returned verbatim
/// in every response.
pub const DATA_SOURCE: &str = "Solar Radiation + AQI dataset + Eco Prediction Insight";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLabel {
    High,
    Medium,
    Low,
}

impl ScoreLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLabel::High => "High",
            ScoreLabel::Medium => "Medium",
            ScoreLabel::Low => "Low",
        }
    }
}

/// Inbound query parameters for the livability endpoint. All four are
/// required; solar and aqi are taken as-is (the calculator clamps).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LivabilityQuery {
    pub lat: f64,
    pub lon: f64,
    pub solar: f64,
    pub aqi: f64,
}

/// Response body for the livability endpoint. Built once per request,
/// immutable after construction.
#[derive(Debug, Clone, Serialize)]
pub struct LivabilityResult {
    pub location_latitude: f64,
    pub location_longitude: f64,
    pub solar_radiation_score: f64,
    pub air_quality_index: f64,
    pub calculated_livability_score: ScoreLabel,
    pub estimated_habitable_years: u32,
    pub gemini_analysis: String,
    pub data_source: String,
}
