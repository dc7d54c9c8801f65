// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AmpUp API client.
//!
//! Every call carries the header set the AmpUp mobile app sends. The upstream
//! rejects requests that differ, so the values are fixed here rather than
//! configurable.

use crate::error::AppError;
use crate::models::{ProxiedRequest, UpstreamLoginRequest};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE,
    USER_AGENT,
};
use reqwest::{Method, StatusCode};

const API_VERSION: &str = "2.9.2";
const CLIENT_TZ: &str = "-300";
const CLIENT_USER_AGENT: &str = "ampUp/2.9.2";
const CLIENT_LANGUAGE: &str = "en";

/// Raw upstream reply: status, declared content type, and body text.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

/// AmpUp API client.
#[derive(Clone)]
pub struct AmpUpClient {
    http: reqwest::Client,
    base_url: String,
    service_authorization: String,
}

impl AmpUpClient {
    /// Create a client for `base_url` using the shared HTTP client.
    ///
    /// `service_authorization` is the full header value (`Basic ...`) sent
    /// when the caller supplies no `Authorization` of its own.
    pub fn new(http: reqwest::Client, base_url: String, service_authorization: String) -> Self {
        Self {
            http,
            base_url,
            service_authorization,
        }
    }

    /// Headers every AmpUp request carries.
    pub fn compat_headers(&self, authorization: Option<&str>) -> Result<HeaderMap, AppError> {
        let authorization = authorization.unwrap_or(&self.service_authorization);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(authorization)
                .map_err(|_| AppError::BadRequest("Invalid Authorization header".to_string()))?,
        );
        headers.insert(
            HeaderName::from_static("x-api-version"),
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(
            HeaderName::from_static("tz"),
            HeaderValue::from_static(CLIENT_TZ),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(CLIENT_LANGUAGE));
        Ok(headers)
    }

    /// `POST /login` with the service credential.
    ///
    /// Returns the upstream status and parsed body whatever the status is. A
    /// body that is not JSON is treated as a transport failure.
    pub async fn login(
        &self,
        request: &UpstreamLoginRequest<'_>,
    ) -> Result<(StatusCode, serde_json::Value), AppError> {
        let url = format!("{}/login", self.base_url);
        let headers = self.compat_headers(None)?;

        tracing::debug!(
            endpoint = %url,
            headers = ?redacted_headers(&headers),
            payload = %request.redacted(),
            "AmpUp login request"
        );

        let response = self
            .http
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "AmpUp login response");

        let body = response.json().await.map_err(|e| {
            AppError::UpstreamTransport(format!("Failed to parse login response: {}", e))
        })?;

        Ok((status, body))
    }

    /// Send a generic forward and return the raw reply.
    pub async fn send(&self, request: &ProxiedRequest) -> Result<UpstreamReply, AppError> {
        let url = request.url(&self.base_url);
        let headers = self.compat_headers(request.authorization.as_deref())?;

        tracing::debug!(
            method = %request.method,
            target = %url,
            headers = ?redacted_headers(&headers),
            body = ?request.body,
            "AmpUp forward request"
        );

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = if request.method == Method::HEAD {
            String::new()
        } else {
            response.text().await?
        };

        tracing::info!(
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or(""),
            "AmpUp forward response"
        );

        Ok(UpstreamReply {
            status,
            content_type,
            body,
        })
    }
}

/// Header map with `Authorization` replaced, for diagnostics.
pub fn redacted_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if name == AUTHORIZATION {
                crate::models::credentials::REDACTED.to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.to_string(), shown)
        })
        .collect()
}
