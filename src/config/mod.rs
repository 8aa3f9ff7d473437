pub mod toml_config;

use crate::core::gemini::{DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_TIMEOUT_SECONDS};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use toml_config::TomlConfig;

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Parser)]
#[command(name = "livability-api")]
#[command(about = "Livability score API with Gemini AI explanations")]
pub struct CliConfig {
    /// Optional TOML config file; CLI flags take precedence over it
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Address to listen on (default 127.0.0.1:8000)")]
    pub bind: Option<String>,

    #[arg(long, help = "Single origin allowed by CORS")]
    pub allowed_origin: Option<String>,

    #[arg(long, help = "Override the Gemini generateContent endpoint")]
    pub gemini_endpoint: Option<String>,

    #[arg(long, help = "Gemini request timeout in seconds")]
    pub gemini_timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Fully resolved runtime configuration: CLI flags over TOML file over
/// built-in defaults. The Gemini credential comes from the environment once,
/// here, and is injected into the client at construction.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind: String,
    pub allowed_origin: String,
    pub gemini_endpoint: String,
    pub gemini_timeout_seconds: u64,
    pub gemini_api_key: Option<String>,
    pub verbose: bool,
}

impl ServiceConfig {
    pub fn resolve(cli: CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        let server = file.server.unwrap_or_default();
        let gemini = file.gemini.unwrap_or_default();

        let api_key = std::env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or(gemini.api_key);

        Ok(Self {
            bind: cli
                .bind
                .or(server.bind)
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            allowed_origin: cli
                .allowed_origin
                .or(server.allowed_origin)
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            gemini_endpoint: cli
                .gemini_endpoint
                .or(gemini.endpoint)
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            gemini_timeout_seconds: cli
                .gemini_timeout_seconds
                .or(gemini.timeout_seconds)
                .unwrap_or(DEFAULT_GEMINI_TIMEOUT_SECONDS),
            gemini_api_key: api_key,
            verbose: cli.verbose,
        })
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("bind", &self.bind)?;
        validation::validate_url("allowed_origin", &self.allowed_origin)?;
        validation::validate_url("gemini_endpoint", &self.gemini_endpoint)?;
        validation::validate_range(
            "gemini_timeout_seconds",
            self.gemini_timeout_seconds,
            1,
            3600,
        )?;
        Ok(())
    }
}
