use anyhow::Result;
use httpmock::prelude::*;
use livability_api::{build_router, AppState, GeminiClient};
use std::sync::Arc;

const TEST_ORIGIN: &str = "http://localhost:3000";

/// Spawn the full router on an ephemeral port and return its base URL.
async fn spawn_app(gemini_server: &MockServer, api_key: Option<&str>) -> Result<String> {
    let provider = GeminiClient::new(
        gemini_server.url("/generate"),
        api_key.map(str::to_string),
        5,
    );
    let state = AppState::new(Arc::new(provider));
    let app = build_router(state, TEST_ORIGIN)?;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn test_livability_score_happy_path() -> Result<()> {
    let gemini = MockServer::start();
    let gemini_mock = gemini.mock(|when, then| {
        when.method(POST).path("/generate").query_param("key", "test-key");
        then.status(200).json_body(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Plenty of sun, clean air."}]}
            }]
        }));
    });

    let base = spawn_app(&gemini, Some("test-key")).await?;
    let response = reqwest::get(format!(
        "{}/livability_score?lat=1.35&lon=103.82&solar=4.5&aqi=20",
        base
    ))
    .await?;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await?;

    // solar 4.5 -> 90, aqi 20 -> 80, combined 85 -> High/80
    assert_eq!(body["location_latitude"], 1.35);
    assert_eq!(body["location_longitude"], 103.82);
    assert_eq!(body["solar_radiation_score"], 4.5);
    assert_eq!(body["air_quality_index"], 20.0);
    assert_eq!(body["calculated_livability_score"], "High");
    assert_eq!(body["estimated_habitable_years"], 80);
    assert_eq!(body["gemini_analysis"], "Plenty of sun, clean air.");
    assert_eq!(
        body["data_source"],
        "Solar Radiation + AQI dataset + Eco Prediction Insight"
    );

    gemini_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_missing_api_key_still_returns_scores() -> Result<()> {
    let gemini = MockServer::start();
    let gemini_mock = gemini.mock(|when, then| {
        when.method(POST).path("/generate");
        then.status(200);
    });

    let base = spawn_app(&gemini, None).await?;
    let response = reqwest::get(format!(
        "{}/livability_score?lat=0&lon=0&solar=2.5&aqi=50",
        base
    ))
    .await?;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["calculated_livability_score"], "Medium");
    assert_eq!(body["estimated_habitable_years"], 50);
    assert_eq!(
        body["gemini_analysis"],
        "GEMINI_API_KEY not set. Skipping AI analysis."
    );

    gemini_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_gemini_failure_never_fails_the_response() -> Result<()> {
    let gemini = MockServer::start();
    gemini.mock(|when, then| {
        when.method(POST).path("/generate");
        then.status(503);
    });

    let base = spawn_app(&gemini, Some("test-key")).await?;
    let response = reqwest::get(format!(
        "{}/livability_score?lat=10&lon=20&solar=0&aqi=400",
        base
    ))
    .await?;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["calculated_livability_score"], "Low");
    let analysis = body["gemini_analysis"].as_str().unwrap();
    assert!(analysis.starts_with("Failed to get Gemini AI analysis: "));
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_latitude_is_rejected_before_scoring() -> Result<()> {
    let gemini = MockServer::start();
    let gemini_mock = gemini.mock(|when, then| {
        when.method(POST).path("/generate");
        then.status(200);
    });

    let base = spawn_app(&gemini, Some("test-key")).await?;
    let response = reqwest::get(format!(
        "{}/livability_score?lat=91&lon=0&solar=2.5&aqi=50",
        base
    ))
    .await?;

    assert_eq!(response.status(), 422);
    let body: serde_json::Value = response.json().await?;
    assert!(body["error"].as_str().unwrap().contains("lat"));

    gemini_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_longitude_is_rejected_before_scoring() -> Result<()> {
    let gemini = MockServer::start();
    let gemini_mock = gemini.mock(|when, then| {
        when.method(POST).path("/generate");
        then.status(200);
    });

    let base = spawn_app(&gemini, Some("test-key")).await?;
    let response = reqwest::get(format!(
        "{}/livability_score?lat=0&lon=181&solar=2.5&aqi=50",
        base
    ))
    .await?;

    assert_eq!(response.status(), 422);
    gemini_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_missing_parameter_is_rejected() -> Result<()> {
    let gemini = MockServer::start();
    let gemini_mock = gemini.mock(|when, then| {
        when.method(POST).path("/generate");
        then.status(200);
    });

    let base = spawn_app(&gemini, Some("test-key")).await?;
    // aqi is absent
    let response =
        reqwest::get(format!("{}/livability_score?lat=0&lon=0&solar=2.5", base)).await?;

    assert!(response.status().is_client_error());
    gemini_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let gemini = MockServer::start();
    let base = spawn_app(&gemini, None).await?;

    let response = reqwest::get(format!("{}/health", base)).await?;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "livability-api");
    Ok(())
}

#[tokio::test]
async fn test_cors_allows_only_the_configured_origin() -> Result<()> {
    let gemini = MockServer::start();
    let base = spawn_app(&gemini, None).await?;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/health", base))
        .header("Origin", TEST_ORIGIN)
        .send()
        .await?;
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(TEST_ORIGIN)
    );

    let response = client
        .get(format!("{}/health", base))
        .header("Origin", "http://evil.example.com")
        .send()
        .await?;
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
    Ok(())
}
