// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication decisions.
//!
//! Every inbound request on a guarded route is reduced to exactly one
//! [`Decision`]. Rejection reasons and configuration faults are for logs
//! only; the HTTP boundary never echoes them to the caller.

/// Outcome of authenticating a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The caller proved its identity under one of the accepted schemes.
    Authorized,
    /// The caller did not prove its identity. Maps to HTTP 401.
    Unauthorized(Rejection),
    /// A secret required by the selected scheme is not provisioned.
    /// Maps to HTTP 500; this is a deployment defect, not an attack.
    ConfigurationError(ConfigFault),
}

/// Why a request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("missing credentials")]
    MissingCredentials,

    #[error("invalid timestamp")]
    InvalidTimestamp,

    /// Timestamp is outside the replay window, in either direction.
    #[error("stale timestamp")]
    StaleTimestamp,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid token")]
    InvalidToken,
}

/// Secret provisioning defects detected while authenticating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigFault {
    #[error("signing secret not configured")]
    SigningSecretMissing,

    #[error("internal token not configured")]
    InternalTokenMissing,
}
