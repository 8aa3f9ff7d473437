use crate::utils::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML config file. Every field is optional; CLI flags override
/// whatever the file provides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerTable>,
    pub gemini: Option<GeminiTable>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerTable {
    pub bind: Option<String>,
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiTable {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub api_key: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ApiError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ApiError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitute ${VAR_NAME} references with environment values. Unset
    /// variables are left as-is so the error surfaces at validation.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
bind = "0.0.0.0:9000"
allowed_origin = "https://app.example.com"

[gemini]
endpoint = "https://gemini.example.com/v1beta/models/gemini-2.0-flash:generateContent"
timeout_seconds = 10
"#,
        )
        .unwrap();

        let server = config.server.unwrap();
        assert_eq!(server.bind.as_deref(), Some("0.0.0.0:9000"));
        assert_eq!(
            server.allowed_origin.as_deref(),
            Some("https://app.example.com")
        );
        let gemini = config.gemini.unwrap();
        assert_eq!(gemini.timeout_seconds, Some(10));
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.server.is_none());
        assert!(config.gemini.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LIVABILITY_TEST_ORIGIN", "http://localhost:5173");
        let config = TomlConfig::from_toml_str(
            r#"
[server]
allowed_origin = "${LIVABILITY_TEST_ORIGIN}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.server.unwrap().allowed_origin.as_deref(),
            Some("http://localhost:5173")
        );
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let config = TomlConfig::from_toml_str(
            r#"
[gemini]
api_key = "${LIVABILITY_TEST_UNSET_VAR}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.gemini.unwrap().api_key.as_deref(),
            Some("${LIVABILITY_TEST_UNSET_VAR}")
        );
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = TomlConfig::from_toml_str("[server\nbind = ").unwrap_err();
        assert!(matches!(err, ApiError::ConfigValidationError { .. }));
    }
}
