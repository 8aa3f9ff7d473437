use crate::core::score::calculate_livability_score;
use crate::domain::model::{LivabilityQuery, LivabilityResult, DATA_SOURCE};
use crate::domain::ports::ExplanationProvider;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::validate_query_range;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ExplanationProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ExplanationProvider>) -> Self {
        Self { provider }
    }
}

/// Build the router with the fixed single-origin CORS policy.
pub fn build_router(state: AppState, allowed_origin: &str) -> Result<Router> {
    let origin = allowed_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::InvalidConfigValueError {
            field: "allowed_origin".to_string(),
            value: allowed_origin.to_string(),
            reason: format!("Not a valid header value: {}", e),
        }
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/livability_score", get(livability_score))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state))
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "livability-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /livability_score?lat&lon&solar&aqi
///
/// Coordinates are range-checked before any scoring or outbound call; solar
/// and aqi pass through unchecked since the calculator clamps them itself.
pub async fn livability_score(
    State(state): State<AppState>,
    Query(query): Query<LivabilityQuery>,
) -> Result<Json<LivabilityResult>> {
    validate_query_range("lat", query.lat, -90.0, 90.0)?;
    validate_query_range("lon", query.lon, -180.0, 180.0)?;

    tracing::debug!(
        "Scoring lat={} lon={} solar={} aqi={}",
        query.lat,
        query.lon,
        query.solar,
        query.aqi
    );

    let (score_label, habitable_years) = calculate_livability_score(query.solar, query.aqi);

    // The explanation prompt only gets the raw inputs, never the label.
    let gemini_analysis = state
        .provider
        .explain(query.lat, query.lon, query.solar, query.aqi, None)
        .await;

    tracing::info!(
        "📊 Scored ({}, {}) as {} ({} habitable years)",
        query.lat,
        query.lon,
        score_label.as_str(),
        habitable_years
    );

    Ok(Json(LivabilityResult {
        location_latitude: query.lat,
        location_longitude: query.lon,
        solar_radiation_score: query.solar,
        air_quality_index: query.aqi,
        calculated_livability_score: score_label,
        estimated_habitable_years: habitable_years,
        gemini_analysis,
        data_source: DATA_SOURCE.to_string(),
    }))
}
