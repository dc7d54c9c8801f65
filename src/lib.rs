// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AmpUp Relay: login and API gateway for the AmpUp charging network
//!
//! Relays browser logins to AmpUp, exchanges the returned custom token for a
//! Firebase ID token, and passes other API calls through unchanged.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{AmpUpClient, ForwardRelay, IdentityClient, LoginRelay};

/// Shared application state. Read-only after startup.
pub struct AppState {
    pub config: Config,
    pub login_relay: LoginRelay,
    pub forward_relay: ForwardRelay,
}

impl AppState {
    /// Build the relays from configuration, sharing one HTTP client.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = services::build_http_client(&config)?;

        let ampup = AmpUpClient::new(
            http.clone(),
            config.ampup_base_url.clone(),
            config.service_authorization(),
        );
        let identity = IdentityClient::new(
            http,
            config.identity_toolkit_url.clone(),
            config.firebase_api_key.clone(),
        );

        Ok(Self {
            login_relay: LoginRelay::new(ampup.clone(), identity),
            forward_relay: ForwardRelay::new(ampup),
            config,
        })
    }
}
