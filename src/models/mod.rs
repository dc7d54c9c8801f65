// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the relay.

pub mod credentials;
pub mod envelope;
pub mod token;

pub use credentials::{Credentials, DeviceContext, LoginRequest, UpstreamLoginRequest};
pub use envelope::{NonJsonEnvelope, ProxiedRequest, RelayResponse};
