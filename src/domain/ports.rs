use async_trait::async_trait;

/// Port for the AI explanation backend. Implementations never fail: every
/// outcome, including missing credentials and transport errors, is rendered
/// as explanation text.
#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    async fn explain(
        &self,
        lat: f64,
        lon: f64,
        solar: f64,
        aqi: f64,
        image_base64: Option<&str>,
    ) -> String;
}
