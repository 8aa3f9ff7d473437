use crate::domain::ports::ExplanationProvider;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

pub const DEFAULT_GEMINI_TIMEOUT_SECONDS: u64 = 30;

const SKIP_MESSAGE: &str = "GEMINI_API_KEY not set. Skipping AI analysis.";
const MALFORMED_MESSAGE: &str = "No AI analysis returned.";

/// Outcome of one analysis attempt. The client never raises: every failure
/// mode has a variant, and `into_text` renders each one as explanation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Extracted `candidates[0].content.parts[0].text`.
    Text(String),
    /// No API key configured; no request was attempted.
    NoCredential,
    /// Network failure, non-2xx status, or undecodable body.
    Transport(String),
    /// Valid JSON but the candidates/content/parts/text path is absent.
    Malformed,
}

impl AnalysisOutcome {
    pub fn into_text(self) -> String {
        match self {
            AnalysisOutcome::Text(text) => text,
            AnalysisOutcome::NoCredential => SKIP_MESSAGE.to_string(),
            AnalysisOutcome::Transport(detail) => {
                format!("Failed to get Gemini AI analysis: {}", detail)
            }
            AnalysisOutcome::Malformed => MALFORMED_MESSAGE.to_string(),
        }
    }
}

/// Client for the Gemini generateContent endpoint. The API key is injected
/// once at construction; a missing key downgrades every call to the skip
/// message without touching the network.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(endpoint: String, api_key: Option<String>, timeout_seconds: u64) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    /// Single attempt, no retries or backoff: the caller gets either the
    /// extracted text or a typed failure.
    pub async fn analyze(
        &self,
        lat: f64,
        lon: f64,
        solar: f64,
        aqi: f64,
        image_base64: Option<&str>,
    ) -> AnalysisOutcome {
        let Some(api_key) = &self.api_key else {
            tracing::debug!("No Gemini API key configured, skipping analysis");
            return AnalysisOutcome::NoCredential;
        };

        let prompt = build_prompt(lat, lon, solar, aqi, image_base64.is_some());

        let mut parts = vec![serde_json::json!({ "text": prompt })];
        if let Some(data) = image_base64 {
            parts.push(serde_json::json!({
                "inline_data": { "mime_type": "image/jpeg", "data": data }
            }));
        }
        let payload = serde_json::json!({ "contents": [{ "parts": parts }] });

        tracing::debug!("Making Gemini request to: {}", self.endpoint);

        let response = match self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key.as_str())])
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Gemini request failed: {}", e);
                return AnalysisOutcome::Transport(e.to_string());
            }
        };
        tracing::debug!("Gemini response status: {}", response.status());

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Gemini returned error status: {}", e);
                return AnalysisOutcome::Transport(e.to_string());
            }
        };

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Gemini response body was not JSON: {}", e);
                return AnalysisOutcome::Transport(e.to_string());
            }
        };

        match body
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|value| value.as_str())
        {
            Some(text) => AnalysisOutcome::Text(text.to_string()),
            None => {
                tracing::warn!("Gemini response had no candidate text");
                AnalysisOutcome::Malformed
            }
        }
    }
}

#[async_trait]
impl ExplanationProvider for GeminiClient {
    async fn explain(
        &self,
        lat: f64,
        lon: f64,
        solar: f64,
        aqi: f64,
        image_base64: Option<&str>,
    ) -> String {
        self.analyze(lat, lon, solar, aqi, image_base64)
            .await
            .into_text()
    }
}

fn build_prompt(lat: f64, lon: f64, solar: f64, aqi: f64, with_image: bool) -> String {
    let mut prompt = format!(
        "Location: lat={}, lon={}\n\
         Solar radiation score: {}\n\
         Air quality index: {}\n\
         Explain the livability of this location based on these scores, \
         and suggest interventions or improvements. ",
        lat, lon, solar, aqi
    );
    if with_image {
        prompt.push_str("Analyze this image together with the scores.\n");
    }
    prompt
}
