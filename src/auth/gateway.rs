// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Scheme selection between internal tokens and signed webhooks.

use std::sync::Arc;

use axum::http::HeaderMap;

use super::clock::{Clock, SystemClock};
use super::decision::{Decision, Rejection};
use super::secrets::Secrets;
use super::signature::validate_signature;
use super::token::validate_token;

/// Internal shared-token header.
pub const INTERNAL_TOKEN_HEADER: &str = "x-replicated-internaltoken";
/// Webhook signature header (`v0=<hex>`).
pub const SIGNATURE_HEADER: &str = "x-slack-signature";
/// Webhook timestamp header (Unix seconds).
pub const SIGNATURE_TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

/// Authentication headers of a request. Empty values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub internal_token: Option<String>,
    pub signature: Option<String>,
    pub signature_timestamp: Option<String>,
}

/// Credential scheme selected for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme<'a> {
    InternalToken(&'a str),
    Signature { signature: &'a str, timestamp: &'a str },
}

impl Credentials {
    pub fn internal(token: impl Into<String>) -> Self {
        Self {
            internal_token: non_empty(token.into()),
            ..Self::default()
        }
    }

    pub fn signed(signature: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            internal_token: None,
            signature: non_empty(signature.into()),
            signature_timestamp: non_empty(timestamp.into()),
        }
    }

    /// Extract credentials from request headers.
    ///
    /// Header values that are not valid UTF-8 are kept lossily so that they
    /// still select their scheme and then fail validation.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .and_then(non_empty)
        };

        Self {
            internal_token: get(INTERNAL_TOKEN_HEADER),
            signature: get(SIGNATURE_HEADER),
            signature_timestamp: get(SIGNATURE_TIMESTAMP_HEADER),
        }
    }

    /// Select the scheme to validate. The internal token takes precedence
    /// over any signature headers.
    pub fn scheme(&self) -> Option<Scheme<'_>> {
        if let Some(token) = self.internal_token.as_deref() {
            return Some(Scheme::InternalToken(token));
        }

        match (self.signature.as_deref(), self.signature_timestamp.as_deref()) {
            (Some(signature), Some(timestamp)) => Some(Scheme::Signature {
                signature,
                timestamp,
            }),
            _ => None,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Decide a single request.
pub fn authorize(credentials: &Credentials, body: &[u8], secrets: &Secrets, now: i64) -> Decision {
    match credentials.scheme() {
        Some(Scheme::InternalToken(presented)) => {
            validate_token(presented, secrets.internal_auth_token())
        }
        Some(Scheme::Signature {
            signature,
            timestamp,
        }) => {
            validate_signature(signature, timestamp, body, secrets.signing_secret(), now)
        }
        None => Decision::Unauthorized(Rejection::MissingCredentials),
    }
}

/// Gateway bound to the process secrets and a clock.
#[derive(Clone)]
pub struct AuthenticationGateway {
    secrets: Arc<Secrets>,
    clock: Arc<dyn Clock>,
}

impl AuthenticationGateway {
    pub fn new(secrets: Secrets) -> Self {
        Self::with_clock(secrets, Arc::new(SystemClock))
    }

    pub fn with_clock(secrets: Secrets, clock: Arc<dyn Clock>) -> Self {
        Self {
            secrets: Arc::new(secrets),
            clock,
        }
    }

    pub fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    pub fn authorize(&self, credentials: &Credentials, body: &[u8]) -> Decision {
        authorize(credentials, body, &self.secrets, self.clock.now_unix())
    }
}

impl std::fmt::Debug for AuthenticationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationGateway")
            .field("secrets", &self.secrets)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::clock::FixedClock;
    use crate::auth::decision::ConfigFault;
    use crate::auth::signature::compute_signature;
    use axum::http::{HeaderName, HeaderValue};
    use proptest::prelude::*;

    const NOW: i64 = 1_700_000_000;
    const TIMESTAMP: &str = "1700000000";
    const BODY: &[u8] = br#"{"a":1}"#;

    fn secrets() -> Secrets {
        Secrets::new("right", "s3cr3t")
    }

    fn valid_signature() -> String {
        compute_signature(TIMESTAMP, BODY, "s3cr3t")
    }

    #[test]
    fn credentials_from_headers_are_case_insensitive() {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            ("X-Replicated-InternalToken", "tok"),
            ("X-SLACK-SIGNATURE", "v0=ab"),
            ("x-slack-request-timestamp", "123"),
        ] {
            headers.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_static(value),
            );
        }

        let credentials = Credentials::from_headers(&headers);
        assert_eq!(credentials.internal_token.as_deref(), Some("tok"));
        assert_eq!(credentials.signature.as_deref(), Some("v0=ab"));
        assert_eq!(credentials.signature_timestamp.as_deref(), Some("123"));
    }

    #[test]
    fn empty_headers_count_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(INTERNAL_TOKEN_HEADER, HeaderValue::from_static(""));
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_static(""));

        let credentials = Credentials::from_headers(&headers);
        assert_eq!(credentials, Credentials::default());
        assert_eq!(credentials.scheme(), None);
    }

    #[test]
    fn non_utf8_token_still_selects_token_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            INTERNAL_TOKEN_HEADER,
            HeaderValue::from_bytes(&[0xff, 0x72]).unwrap(),
        );
        let credentials = Credentials::from_headers(&headers);
        assert!(matches!(credentials.scheme(), Some(Scheme::InternalToken(_))));
        assert_eq!(
            authorize(&credentials, BODY, &secrets(), NOW),
            Decision::Unauthorized(Rejection::InvalidToken)
        );
    }

    #[test]
    fn signed_request_is_authorized() {
        let credentials = Credentials::signed(valid_signature(), TIMESTAMP);
        assert_eq!(authorize(&credentials, BODY, &secrets(), NOW), Decision::Authorized);
    }

    #[test]
    fn signed_request_400_seconds_later_is_stale() {
        let credentials = Credentials::signed(valid_signature(), TIMESTAMP);
        assert_eq!(
            authorize(&credentials, BODY, &secrets(), NOW + 400),
            Decision::Unauthorized(Rejection::StaleTimestamp)
        );
    }

    #[test]
    fn wrong_internal_token_is_rejected() {
        let credentials = Credentials::internal("wrong");
        assert_eq!(
            authorize(&credentials, BODY, &secrets(), NOW),
            Decision::Unauthorized(Rejection::InvalidToken)
        );
    }

    #[test]
    fn wrong_token_is_not_rescued_by_valid_signature() {
        let credentials = Credentials {
            internal_token: Some("wrong".to_string()),
            ..Credentials::signed(valid_signature(), TIMESTAMP)
        };
        assert_eq!(
            authorize(&credentials, BODY, &secrets(), NOW),
            Decision::Unauthorized(Rejection::InvalidToken)
        );
    }

    #[test]
    fn valid_token_ignores_bad_signature() {
        let credentials = Credentials {
            internal_token: Some("right".to_string()),
            ..Credentials::signed("v0=bogus", "not-a-number")
        };
        assert_eq!(authorize(&credentials, BODY, &secrets(), NOW), Decision::Authorized);
    }

    #[test]
    fn no_credentials_is_rejected() {
        assert_eq!(
            authorize(&Credentials::default(), BODY, &secrets(), NOW),
            Decision::Unauthorized(Rejection::MissingCredentials)
        );
    }

    #[test]
    fn half_of_signature_scheme_is_missing_credentials() {
        let only_signature = Credentials {
            signature: Some(valid_signature()),
            ..Credentials::default()
        };
        let only_timestamp = Credentials {
            signature_timestamp: Some(TIMESTAMP.to_string()),
            ..Credentials::default()
        };
        for credentials in [only_signature, only_timestamp] {
            assert_eq!(
                authorize(&credentials, BODY, &secrets(), NOW),
                Decision::Unauthorized(Rejection::MissingCredentials)
            );
        }
    }

    #[test]
    fn unprovisioned_secrets_are_configuration_errors() {
        let empty = Secrets::default();
        assert_eq!(
            authorize(&Credentials::internal("anything"), BODY, &empty, NOW),
            Decision::ConfigurationError(ConfigFault::InternalTokenMissing)
        );
        assert_eq!(
            authorize(&Credentials::signed(valid_signature(), TIMESTAMP), BODY, &empty, NOW),
            Decision::ConfigurationError(ConfigFault::SigningSecretMissing)
        );
    }

    #[test]
    fn gateway_reads_time_from_its_clock() {
        let credentials = Credentials::signed(valid_signature(), TIMESTAMP);

        let fresh = AuthenticationGateway::with_clock(secrets(), Arc::new(FixedClock(NOW)));
        assert_eq!(fresh.authorize(&credentials, BODY), Decision::Authorized);

        let late = AuthenticationGateway::with_clock(secrets(), Arc::new(FixedClock(NOW + 400)));
        assert_eq!(
            late.authorize(&credentials, BODY),
            Decision::Unauthorized(Rejection::StaleTimestamp)
        );
    }

    #[test]
    fn gateway_debug_does_not_leak_secrets() {
        let gateway = AuthenticationGateway::new(secrets());
        let debug = format!("{gateway:?}");
        assert!(!debug.contains("right"));
        assert!(!debug.contains("s3cr3t"));
    }

    fn arb_credentials() -> impl Strategy<Value = Credentials> {
        (
            proptest::option::of("[ -~]{0,32}"),
            proptest::option::of("[ -~]{0,80}"),
            proptest::option::of("[0-9]{0,12}"),
        )
            .prop_map(|(internal_token, signature, signature_timestamp)| Credentials {
                internal_token: internal_token.and_then(non_empty),
                signature: signature.and_then(non_empty),
                signature_timestamp: signature_timestamp.and_then(non_empty),
            })
    }

    proptest! {
        #[test]
        fn token_outcome_ignores_signature_headers(
            token in "[ -~]{1,32}",
            signature in proptest::option::of("[ -~]{0,80}"),
            timestamp in proptest::option::of("[0-9]{0,12}"),
        ) {
            let bare = Credentials::internal(token.clone());
            let mixed = Credentials {
                internal_token: Some(token),
                signature,
                signature_timestamp: timestamp,
            };
            prop_assert_eq!(
                authorize(&bare, BODY, &secrets(), NOW),
                authorize(&mixed, BODY, &secrets(), NOW)
            );
        }

        #[test]
        fn authorize_is_idempotent(
            credentials in arb_credentials(),
            body in proptest::collection::vec(any::<u8>(), 0..128),
            now in 0i64..4_000_000_000,
        ) {
            let first = authorize(&credentials, &body, &secrets(), now);
            let second = authorize(&credentials, &body, &secrets(), now);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn empty_signing_secret_never_authorizes_webhooks(
            signature in "[ -~]{1,80}",
            timestamp in "[ -~]{1,12}",
            now in any::<i64>(),
        ) {
            let credentials = Credentials::signed(signature, timestamp);
            prop_assert_eq!(
                authorize(&credentials, BODY, &Secrets::new("right", ""), now),
                Decision::ConfigurationError(ConfigFault::SigningSecretMissing)
            );
        }
    }
}
