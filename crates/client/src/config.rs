//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORDERLY_SESSION_TOKEN` - Bearer session token issued by the host runtime
//!
//! ## Optional
//! - `ORDERLY_API_BASE_URL` - Backend base URL (default: `https://orderly-be.test/api`)

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default backend base URL for local development.
const DEFAULT_API_BASE_URL: &str = "https://orderly-be.test/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Backend client configuration.
///
/// Implements `Debug` manually to redact the session token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub api_base_url: String,
    /// Bearer session token for every request.
    pub session_token: SecretString,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("session_token", &"[REDACTED]")
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration from an already-validated base URL and token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL does not parse.
    pub fn new(api_base_url: &str, session_token: SecretString) -> Result<Self, ConfigError> {
        let _ = Url::parse(api_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("ORDERLY_API_BASE_URL".to_string(), e.to_string())
        })?;
        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            session_token,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the session token is missing or the base URL
    /// is not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = std::env::var("ORDERLY_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let token = std::env::var("ORDERLY_SESSION_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("ORDERLY_SESSION_TOKEN".to_string()))?;

        Self::new(&base_url, SecretString::from(token))
    }
}
