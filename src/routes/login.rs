// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login route.

use axum::{body::Bytes, extract::State, routing::post, Router};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::credentials::mask_email;
use crate::models::{LoginRequest, RelayResponse};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/login", post(login))
}

/// Log in to AmpUp and return its response, enriched with an ID token when
/// the exchange succeeds.
///
/// The body is parsed by hand so that malformed JSON gets the same 400 as
/// missing fields instead of axum's plain-text rejection.
async fn login(State(state): State<Arc<AppState>>, body: Bytes) -> Result<RelayResponse> {
    let request = LoginRequest::from_body(&body);
    if let Some(email) = request.email.as_deref() {
        tracing::info!(email = %mask_email(email), "Received login request");
    }

    let credentials = request
        .into_credentials()
        .ok_or_else(|| AppError::BadRequest(AppError::MISSING_CREDENTIALS.to_string()))?;

    state.login_relay.login(&credentials).await
}
