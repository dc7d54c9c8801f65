// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase Identity Toolkit client.
//!
//! Exchanges the custom token AmpUp issues at login for an ID token that the
//! AmpUp API accepts as a bearer credential.

use crate::models::token;
use serde::Serialize;

/// Body of `accounts:signInWithCustomToken`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithCustomTokenRequest<'a> {
    token: &'a str,
    return_secure_token: bool,
}

/// Why a token exchange produced no ID token.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Firebase API key is not configured")]
    MissingApiKey,

    #[error("Exchange request failed: {0}")]
    Transport(String),

    #[error("Exchange rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Exchange response was not JSON: {0}")]
    MalformedBody(String),

    #[error("Exchange response has no idToken")]
    MissingIdToken,
}

/// Identity Toolkit client.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl IdentityClient {
    pub fn new(http: reqwest::Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// Whether exchanges can be attempted at all.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Exchange a custom token for an ID token.
    pub async fn sign_in_with_custom_token(
        &self,
        custom_token: &str,
    ) -> Result<String, ExchangeError> {
        let api_key = self.api_key.as_deref().ok_or(ExchangeError::MissingApiKey)?;
        let url = format!(
            "{}/v1/accounts:signInWithCustomToken?key={}",
            self.base_url,
            urlencoding::encode(api_key)
        );

        let response = self
            .http
            .post(&url)
            .json(&SignInWithCustomTokenRequest {
                token: custom_token,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| ExchangeError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "Firebase exchange response");

        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(ExchangeError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ExchangeError::MalformedBody(e.to_string()))?;

        token::id_token(&parsed)
            .map(str::to_string)
            .ok_or(ExchangeError::MissingIdToken)
    }
}
