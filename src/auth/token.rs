// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Static internal token validation.

use subtle::ConstantTimeEq;

use super::decision::{ConfigFault, Decision, Rejection};

/// Validate a presented internal token against the provisioned one.
///
/// An empty `expected` token is a provisioning defect and never matches
/// anything, including an empty presented value.
pub fn validate_token(presented: &str, expected: &str) -> Decision {
    if expected.is_empty() {
        return Decision::ConfigurationError(ConfigFault::InternalTokenMissing);
    }

    if bool::from(presented.as_bytes().ct_eq(expected.as_bytes())) {
        Decision::Authorized
    } else {
        Decision::Unauthorized(Rejection::InvalidToken)
    }
}
