// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login credentials and the device context the AmpUp API expects with them.

use rand::Rng;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Placeholder written wherever a secret would otherwise be logged.
pub const REDACTED: &str = "[REDACTED]";

const DEVICE_ID_PREFIX: &str = "WEB-";
const DEVICE_ID_SUFFIX_LEN: usize = 13;
const DEVICE_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const DEVICE_NAME: &str = "Web Browser";

/// Body of `POST /api/login` as sent by the browser.
///
/// Both fields are optional here so that a missing field is reported as a
/// validation error rather than a deserialization failure.
#[derive(Deserialize, Default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Parse a raw request body. Anything that is not a JSON object with
    /// string fields yields an empty request.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Validated credentials, or `None` if either field is missing or empty.
    pub fn into_credentials(self) -> Option<Credentials> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some(Credentials { email, password })
            }
            _ => None,
        }
    }
}

/// Validated user credentials. Lives for one login call.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &mask_email(&self.email))
            .field("password", &REDACTED)
            .finish()
    }
}

/// Device description the AmpUp login endpoint requires.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceContext {
    pub device_id: String,
    pub device_name: &'static str,
    pub fcm_token: &'static str,
    pub lat: i32,
    pub lng: i32,
}

impl DeviceContext {
    /// Synthesize a browser device with a fresh identifier.
    pub fn generate() -> Self {
        Self {
            device_id: generate_device_id(),
            device_name: DEVICE_NAME,
            fcm_token: "",
            lat: 0,
            lng: 0,
        }
    }
}

/// Body of the upstream `POST /login` call.
#[derive(Serialize)]
pub struct UpstreamLoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(flatten)]
    pub device: &'a DeviceContext,
}

impl<'a> UpstreamLoginRequest<'a> {
    pub fn new(credentials: &'a Credentials, device: &'a DeviceContext) -> Self {
        Self {
            email: &credentials.email,
            password: &credentials.password,
            device,
        }
    }

    /// The same payload with the password replaced, for diagnostics.
    pub fn redacted(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(UpstreamLoginRequest {
            email: self.email,
            password: REDACTED,
            device: self.device,
        })
        .unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "email".to_string(),
                serde_json::Value::String(mask_email(self.email)),
            );
        }
        value
    }
}

/// `WEB-` followed by 13 random base-36 characters.
///
/// Not a security boundary; collisions are tolerated.
pub fn generate_device_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..DEVICE_ID_SUFFIX_LEN)
        .map(|_| DEVICE_ID_ALPHABET[rng.random_range(0..DEVICE_ID_ALPHABET.len())] as char)
        .collect();
    format!("{}{}", DEVICE_ID_PREFIX, suffix)
}

/// Mask an email for logging: keep the first character of the local part
/// and the domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => REDACTED.to_string(),
    }
}
