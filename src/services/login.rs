// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login relay: AmpUp login followed by a best-effort token exchange.
//!
//! 1. POST the credentials and a synthesized device to AmpUp `/login`
//! 2. If AmpUp answered 2xx with a custom token at `data.token`, exchange it
//!    with Identity Toolkit
//! 3. On a successful exchange, add the ID token as `data.access_token`
//!
//! The caller always gets AmpUp's status. A failed exchange only means the
//! response lacks `access_token`.

use crate::error::AppError;
use crate::models::token;
use crate::models::{Credentials, DeviceContext, RelayResponse, UpstreamLoginRequest};
use crate::services::ampup::AmpUpClient;
use crate::services::identity::{ExchangeError, IdentityClient};

/// Login relay over the AmpUp and Identity Toolkit clients.
#[derive(Clone)]
pub struct LoginRelay {
    ampup: AmpUpClient,
    identity: IdentityClient,
}

impl LoginRelay {
    pub fn new(ampup: AmpUpClient, identity: IdentityClient) -> Self {
        Self { ampup, identity }
    }

    /// Log in and return the merged response.
    ///
    /// Errors only when AmpUp itself cannot be reached or answers with
    /// something other than JSON.
    pub async fn login(&self, credentials: &Credentials) -> Result<RelayResponse, AppError> {
        let device = DeviceContext::generate();
        let request = UpstreamLoginRequest::new(credentials, &device);

        tracing::info!(device_id = %device.device_id, "Relaying AmpUp login");

        let (status, mut body) = self.ampup.login(&request).await?;

        let custom_token = match token::custom_token(&body) {
            Some(t) if status.is_success() => Some(t.to_string()),
            _ => None,
        };

        if let Some(custom_token) = custom_token {
            match self.identity.sign_in_with_custom_token(&custom_token).await {
                Ok(id_token) => {
                    if token::merge_access_token(&mut body, &id_token) {
                        tracing::info!(
                            device_id = %device.device_id,
                            "Exchanged custom token for ID token"
                        );
                    }
                }
                Err(ExchangeError::MissingApiKey) => {
                    tracing::warn!(
                        device_id = %device.device_id,
                        "FIREBASE_API_KEY not set, skipping token exchange"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        device_id = %device.device_id,
                        error = %e,
                        "Firebase token exchange failed, returning original response"
                    );
                }
            }
        }

        match token::session_token(&body) {
            Some((field, value)) => tracing::debug!(
                field,
                token_len = value.len(),
                "Login response carries session token"
            ),
            None => tracing::debug!("Login response carries no session token"),
        }

        Ok(RelayResponse::new(status, body))
    }
}
