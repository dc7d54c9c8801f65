// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic pass-through to the AmpUp API.
//!
//! One attempt per call, no retries. JSON replies go back verbatim; anything
//! else is wrapped in a [`NonJsonEnvelope`](crate::models::NonJsonEnvelope)
//! with the upstream status kept.

use axum::http::Method;
use serde_json::Value;

use crate::error::AppError;
use crate::models::envelope::{is_json_content_type, truncate_chars, RAW_RESPONSE_LOG_CHARS};
use crate::models::{ProxiedRequest, RelayResponse};
use crate::services::ampup::AmpUpClient;

/// Pass-through relay over the AmpUp client.
#[derive(Clone)]
pub struct ForwardRelay {
    ampup: AmpUpClient,
}

impl ForwardRelay {
    pub fn new(ampup: AmpUpClient) -> Self {
        Self { ampup }
    }

    /// Forward one request and normalize the reply.
    pub async fn forward(&self, request: &ProxiedRequest) -> Result<RelayResponse, AppError> {
        let reply = self.ampup.send(request).await?;

        if !is_json_content_type(reply.content_type.as_deref()) {
            tracing::error!(
                status = reply.status.as_u16(),
                body = truncate_chars(&reply.body, RAW_RESPONSE_LOG_CHARS),
                "Non-JSON response from AmpUp"
            );
            return Ok(RelayResponse::non_json(reply.status, &reply.body));
        }

        if request.method == Method::HEAD {
            return Ok(RelayResponse::new(reply.status, Value::Object(Default::default())));
        }

        let body = serde_json::from_str(&reply.body).map_err(|e| {
            AppError::UpstreamTransport(format!("Failed to parse AmpUp response: {}", e))
        })?;

        Ok(RelayResponse::new(reply.status, body))
    }
}
