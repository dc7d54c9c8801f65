// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - upstream clients and relay logic.

pub mod ampup;
pub mod forward;
pub mod identity;
pub mod login;

pub use ampup::AmpUpClient;
pub use forward::ForwardRelay;
pub use identity::{ExchangeError, IdentityClient};
pub use login::LoginRelay;

use crate::config::Config;
use anyhow::Context;

/// Build the shared outbound HTTP client.
pub fn build_http_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()
        .context("failed building outbound HTTP client")
}
