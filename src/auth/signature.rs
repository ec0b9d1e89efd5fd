// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Slack-style webhook signature verification.
//!
//! ## Protocol
//!
//! 1. The sender builds the base string `v0:<timestamp>:<raw body>`
//! 2. It computes HMAC-SHA256 over the base string keyed by the shared
//!    signing secret and sends `v0=<lowercase hex digest>`
//! 3. We recompute the digest over the exact bytes received and compare in
//!    constant time
//!
//! The timestamp is taken verbatim from the header and the body is never
//! re-encoded; either would change the digest.
//!
//! Requests whose timestamp is more than [`FRESHNESS_WINDOW_SECS`] away from
//! the local clock, in the past or the future, are rejected before any
//! digest is computed.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::decision::{ConfigFault, Decision, Rejection};

type HmacSha256 = Hmac<Sha256>;

/// Signature scheme version prefix.
pub const SIGNATURE_VERSION: &str = "v0";

/// Replay window (5 minutes).
pub const FRESHNESS_WINDOW_SECS: u64 = 300;

/// Validate a webhook signature over the raw request body.
pub fn validate_signature(
    signature: &str,
    timestamp: &str,
    body: &[u8],
    signing_secret: &str,
    now: i64,
) -> Decision {
    if signing_secret.is_empty() {
        return Decision::ConfigurationError(ConfigFault::SigningSecretMissing);
    }

    let issued_at: i64 = match timestamp.parse() {
        Ok(value) => value,
        Err(_) => return Decision::Unauthorized(Rejection::InvalidTimestamp),
    };

    if now.abs_diff(issued_at) > FRESHNESS_WINDOW_SECS {
        return Decision::Unauthorized(Rejection::StaleTimestamp);
    }

    let expected = compute_signature(timestamp, body, signing_secret);

    // `ct_eq` on slices of different length returns false without
    // inspecting contents; only the length is observable.
    if bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
        Decision::Authorized
    } else {
        Decision::Unauthorized(Rejection::InvalidSignature)
    }
}

/// Compute the `v0=<hex>` signature a sender would attach to `body`.
pub fn compute_signature(timestamp: &str, body: &[u8], signing_secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(SIGNATURE_VERSION.as_bytes());
    mac.update(b":");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);

    let digest = mac.finalize().into_bytes();
    format!("{SIGNATURE_VERSION}={}", hex::encode(digest))
}
