// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic AmpUp pass-through under `/api/ampup`.

use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::{header, HeaderMap, Method},
    routing::any,
    Router,
};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{ProxiedRequest, RelayResponse};
use crate::AppState;

/// Prefix stripped before forwarding.
pub const ROUTE_PREFIX: &str = "/api/ampup";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(ROUTE_PREFIX, any(forward))
        .route("/api/ampup/", any(forward))
        .route("/api/ampup/{*path}", any(forward))
}

/// Forward the request to AmpUp with method, path, query, Authorization and
/// body preserved.
async fn forward(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<RelayResponse> {
    // Taken from the raw URI so percent-encoding reaches AmpUp untouched.
    let path = uri.path().strip_prefix(ROUTE_PREFIX).unwrap_or_default();

    let authorization = headers
        .get(header::AUTHORIZATION)
        .map(|v| {
            v.to_str()
                .map(str::to_string)
                .map_err(|_| AppError::BadRequest("Invalid Authorization header".to_string()))
        })
        .transpose()?;

    let request = ProxiedRequest::new(method, path, uri.query(), authorization, &body)
        .map_err(|_| AppError::BadRequest(AppError::INVALID_JSON_BODY.to_string()))?;

    tracing::info!(
        method = %request.method,
        path = %request.path,
        caller_auth = request.authorization.is_some(),
        "Proxying AmpUp request"
    );

    state.forward_relay.forward(&request).await
}
