use clap::Parser;
use livability_api::utils::{logger, validation::Validate};
use livability_api::{build_router, AppState, CliConfig, GeminiClient, ServiceConfig};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_server_logger(cli.verbose);

    tracing::info!("Starting livability-api");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match ServiceConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration loading failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if config.gemini_api_key.is_none() {
        tracing::warn!(
            "⚠️ GEMINI_API_KEY not set; responses will skip the AI analysis"
        );
    } else {
        tracing::info!("🔐 Gemini API key loaded");
    }

    let provider = GeminiClient::new(
        config.gemini_endpoint.clone(),
        config.gemini_api_key.clone(),
        config.gemini_timeout_seconds,
    );
    let state = AppState::new(Arc::new(provider));
    let app = build_router(state, &config.allowed_origin)?;

    let addr: SocketAddr = config.bind.parse().map_err(livability_api::ApiError::from)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("✅ Listening on http://{}", addr);
    tracing::info!("🌐 CORS allowed origin: {}", config.allowed_origin);

    axum::serve(listener, app).await?;

    Ok(())
}
