// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Request authentication for the private API surface.
//!
//! ## Schemes
//!
//! Two mutually exclusive credential schemes are accepted:
//!
//! 1. **Internal token**: `X-Replicated-InternalToken: <shared token>`.
//!    If this header is present it decides the request on its own; any
//!    signature headers are ignored.
//! 2. **Signed webhook**: `X-Slack-Signature: v0=<hex>` together with
//!    `X-Slack-Request-Timestamp: <unix seconds>`, verified as HMAC-SHA256
//!    over `v0:<timestamp>:<raw body>`.
//!
//! Anything else is rejected.
//!
//! ## Security
//!
//! - Fails closed: a missing secret yields a configuration error (HTTP 500),
//!   never an accepted request
//! - Signatures and tokens are compared in constant time
//! - Signed requests older or newer than 5 minutes are rejected
//! - Rejection reasons are logged, not returned to the caller

pub mod clock;
pub mod decision;
pub mod error;
pub mod gateway;
pub mod middleware;
pub mod secrets;
pub mod signature;
pub mod token;

pub use clock::{Clock, FixedClock, SystemClock};
pub use decision::{ConfigFault, Decision, Rejection};
pub use error::AuthError;
pub use gateway::{
    authorize, AuthenticationGateway, Credentials, Scheme, INTERNAL_TOKEN_HEADER,
    SIGNATURE_HEADER, SIGNATURE_TIMESTAMP_HEADER,
};
pub use middleware::require_auth_tokens;
pub use secrets::{EnvSecretStore, SecretStore, SecretStoreError, Secrets, StaticSecretStore};
pub use signature::{compute_signature, validate_signature, FRESHNESS_WINDOW_SECS};
pub use token::validate_token;
