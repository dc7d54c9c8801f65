// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request and response envelopes for relayed calls.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Characters of a non-JSON body echoed back to the caller.
pub const RAW_RESPONSE_PREVIEW_CHARS: usize = 100;
/// Characters of a non-JSON body written to the log.
pub const RAW_RESPONSE_LOG_CHARS: usize = 500;

/// One generic forward, built from the inbound request.
#[derive(Debug, Clone)]
pub struct ProxiedRequest {
    pub method: Method,
    /// Path relative to the upstream origin, with one leading slash removed.
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    /// Caller's `Authorization` header, if any.
    pub authorization: Option<String>,
    /// JSON body. Always `None` for GET and HEAD.
    pub body: Option<Value>,
}

impl ProxiedRequest {
    /// Build an envelope, parsing the body for methods that carry one.
    ///
    /// An empty body on a non-GET/HEAD method is sent as `{}`.
    pub fn new(
        method: Method,
        path: &str,
        query: Option<&str>,
        authorization: Option<String>,
        body: &[u8],
    ) -> Result<Self, serde_json::Error> {
        let body = if method == Method::GET || method == Method::HEAD {
            None
        } else if body.iter().all(u8::is_ascii_whitespace) {
            Some(Value::Object(Default::default()))
        } else {
            Some(serde_json::from_slice(body)?)
        };

        Ok(Self {
            method,
            path: path.strip_prefix('/').unwrap_or(path).to_string(),
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
            authorization,
            body,
        })
    }

    /// Full upstream URL: `<base>/<path>[?<query>]`.
    pub fn url(&self, base_url: &str) -> String {
        match &self.query {
            Some(query) => format!("{}/{}?{}", base_url, self.path, query),
            None => format!("{}/{}", base_url, self.path),
        }
    }
}

/// Body returned in place of an upstream reply that was not JSON.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NonJsonEnvelope {
    pub status: String,
    pub message: String,
    pub raw_response: String,
}

impl NonJsonEnvelope {
    pub fn new(status: StatusCode, raw: &str) -> Self {
        Self {
            status: "ERROR".to_string(),
            message: format!(
                "Non-JSON response received (Status: {}).",
                status.as_u16()
            ),
            raw_response: format!("{}...", truncate_chars(raw, RAW_RESPONSE_PREVIEW_CHARS)),
        }
    }
}

/// Status and JSON body handed back to the browser.
#[derive(Debug, Clone)]
pub struct RelayResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl RelayResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// Normalize a non-JSON upstream reply, keeping the upstream status.
    pub fn non_json(status: StatusCode, raw: &str) -> Self {
        let envelope = NonJsonEnvelope::new(status, raw);
        Self {
            status,
            body: serde_json::to_value(envelope).unwrap_or_default(),
        }
    }
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// First `max` characters of `s`, never splitting a UTF-8 sequence.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Whether a `Content-Type` value declares JSON.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
}
