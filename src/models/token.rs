// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token extraction from opaque upstream JSON.
//!
//! The AmpUp and Identity Toolkit responses are passed through untouched, so
//! the relay never deserializes them into structs. These helpers pick out the
//! few fields it needs and return `None` when a field is absent, empty, or
//! not a string.

use serde_json::Value;

/// Field the merged login response carries the exchanged ID token in.
pub const ACCESS_TOKEN_FIELD: &str = "access_token";

/// Session token fields in the order callers should prefer them.
pub const SESSION_TOKEN_FIELDS: [&str; 3] = ["token", "access_token", "auth_token"];

fn non_empty_str<'a>(value: Option<&'a Value>) -> Option<&'a str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Custom token issued by the AmpUp login endpoint, at `data.token`.
pub fn custom_token(login_body: &Value) -> Option<&str> {
    non_empty_str(login_body.get("data").and_then(|data| data.get("token")))
}

/// ID token returned by `accounts:signInWithCustomToken`, at `idToken`.
pub fn id_token(exchange_body: &Value) -> Option<&str> {
    non_empty_str(exchange_body.get("idToken"))
}

/// First session token found on a login response.
///
/// Tries `token`, then `access_token`, then `auth_token`, first on the
/// top-level object and then on `data`. Returns the field name with the value.
pub fn session_token(body: &Value) -> Option<(&'static str, &str)> {
    [Some(body), body.get("data")]
        .into_iter()
        .flatten()
        .find_map(|obj| {
            SESSION_TOKEN_FIELDS
                .iter()
                .find_map(|field| non_empty_str(obj.get(*field)).map(|v| (*field, v)))
        })
}

/// Set `data.access_token` on a login response, overwriting any prior value.
///
/// Returns `false` and leaves the body untouched if `data` is not an object.
pub fn merge_access_token(login_body: &mut Value, access_token: &str) -> bool {
    match login_body.get_mut("data").and_then(Value::as_object_mut) {
        Some(data) => {
            data.insert(
                ACCESS_TOKEN_FIELD.to_string(),
                Value::String(access_token.to_string()),
            );
            true
        }
        None => false,
    }
}
