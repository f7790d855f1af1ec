//! Application configuration loaded from environment variables.
//!
//! Secrets are read once at startup and cached in memory. The Clerk webhook
//! secret is the one exception: it stays optional here and the webhook route
//! fails the request if it is unset.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Gemini model used for plan generation
    pub gemini_model: String,

    // --- Secrets ---
    /// Gemini API key
    pub gemini_api_key: String,
    /// Clerk webhook signing secret (`whsec_...`), checked per request
    pub clerk_webhook_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// For local development, secrets can be set via a `.env` file. In
    /// production, Cloud Run injects them as environment variables via
    /// secret bindings.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash-001".to_string()),

            gemini_api_key: env::var("GEMINI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GEMINI_API_KEY"))?,
            clerk_webhook_secret: env::var("CLERK_WEBHOOK_SECRET")
                .ok()
                .map(|v| v.trim().to_string()),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            gemini_model: "gemini-2.0-flash-001".to_string(),
            gemini_api_key: "test_api_key".to_string(),
            // Base64 for b"test_webhook_signing_secret!"
            clerk_webhook_secret: Some("whsec_dGVzdF93ZWJob29rX3NpZ25pbmdfc2VjcmV0IQ==".to_string()),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("GEMINI_API_KEY", "test_key");
        env::remove_var("CLERK_WEBHOOK_SECRET");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.gemini_api_key, "test_key");
        assert_eq!(config.port, 8080);
        assert!(config.clerk_webhook_secret.is_none());
    }
}
