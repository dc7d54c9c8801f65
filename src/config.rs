// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything here is read once at startup and shared read-only by every
//! request. There is no hot-reload.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::env;
use std::time::Duration;

/// Service client ID the AmpUp mobile app authenticates with.
const DEFAULT_CLIENT_ID: &str = "BDjgmHiEqjyHMdJe";
/// Service client secret paired with [`DEFAULT_CLIENT_ID`].
const DEFAULT_CLIENT_SECRET: &str = "w8ntYVuFBTANzesb";

const DEFAULT_AMPUP_BASE_URL: &str = "https://main.ampupapis.com";
const DEFAULT_IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Application configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Origin allowed by CORS. `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
    /// AmpUp API origin, without trailing slash
    pub ampup_base_url: String,
    /// Identity Toolkit origin, without trailing slash
    pub identity_toolkit_url: String,
    /// Timeout applied to every outbound call
    pub upstream_timeout: Duration,

    // --- Secrets ---
    /// Base64 `client_id:client_secret` sent as `Authorization: Basic ...`
    pub service_credential: String,
    /// Firebase Web API key. Token exchange is skipped when absent.
    pub firebase_api_key: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .field("ampup_base_url", &self.ampup_base_url)
            .field("identity_toolkit_url", &self.identity_toolkit_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("service_credential", &"[REDACTED]")
            .field(
                "firebase_api_key",
                &self.firebase_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 3001,
            cors_allowed_origin: None,
            ampup_base_url: "http://127.0.0.1:1".to_string(),
            identity_toolkit_url: "http://127.0.0.1:1".to_string(),
            upstream_timeout: Duration::from_secs(5),
            service_credential: encode_service_credential("test_client", "test_secret"),
            firebase_api_key: Some("test_api_key".to_string()),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file is read first if present. Only malformed values are
    /// errors; every variable has a usable default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", v))?,
            Err(_) => DEFAULT_PORT,
        };

        let upstream_timeout_secs = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("UPSTREAM_TIMEOUT_SECS", v))?,
            Err(_) => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        let service_credential = match non_empty_var("AMPUP_SERVICE_CREDENTIAL") {
            Some(encoded) => encoded,
            None => {
                let client_id = non_empty_var("AMPUP_CLIENT_ID")
                    .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());
                let client_secret = non_empty_var("AMPUP_CLIENT_SECRET")
                    .unwrap_or_else(|| DEFAULT_CLIENT_SECRET.to_string());
                encode_service_credential(&client_id, &client_secret)
            }
        };

        Ok(Self {
            port,
            cors_allowed_origin: non_empty_var("CORS_ALLOWED_ORIGIN"),
            ampup_base_url: base_url_var("AMPUP_BASE_URL", DEFAULT_AMPUP_BASE_URL),
            identity_toolkit_url: base_url_var(
                "IDENTITY_TOOLKIT_URL",
                DEFAULT_IDENTITY_TOOLKIT_URL,
            ),
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            service_credential,
            firebase_api_key: non_empty_var("FIREBASE_API_KEY"),
        })
    }

    /// `Authorization` value used when the caller supplies none.
    pub fn service_authorization(&self) -> String {
        format!("Basic {}", self.service_credential)
    }
}

/// Encode a client ID/secret pair the way HTTP Basic auth expects.
pub fn encode_service_credential(client_id: &str, client_secret: &str) -> String {
    STANDARD.encode(format!("{}:{}", client_id, client_secret))
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn base_url_var(name: &str, default: &str) -> String {
    non_empty_var(name)
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
