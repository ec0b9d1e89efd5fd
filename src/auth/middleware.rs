// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Apply to a router subtree with
//! `axum::middleware::from_fn_with_state(state, require_auth_tokens)`.
//!
//! Only signed webhooks cover the body. For those the body is read once into
//! memory, verified, and handed back to the request so downstream extractors
//! see exactly the bytes that were signed. Every other request is decided
//! from its headers before the body is touched.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use super::{AuthError, Credentials, Decision, Scheme};
use crate::state::AppState;

/// Reject requests that do not carry a valid internal token or webhook
/// signature.
pub async fn require_auth_tokens(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let credentials = Credentials::from_headers(request.headers());

    let (decision, request) = match credentials.scheme() {
        Some(Scheme::Signature { .. }) => {
            let (parts, body) = request.into_parts();
            let body = match to_bytes(body, state.max_body_bytes).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(
                        method = %parts.method,
                        path = %parts.uri.path(),
                        error = %e,
                        "failed to buffer signed request body"
                    );
                    return AuthError::UnreadableBody.into_response();
                }
            };
            let decision = state.gateway.authorize(&credentials, &body);
            (decision, Request::from_parts(parts, Body::from(body)))
        }
        // Token and missing-credential decisions never depend on the body.
        _ => (state.gateway.authorize(&credentials, &[]), request),
    };

    match decision {
        Decision::Authorized => next.run(request).await,
        Decision::Unauthorized(reason) => {
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                %reason,
                "rejected unauthenticated request"
            );
            AuthError::Unauthorized.into_response()
        }
        Decision::ConfigurationError(fault) => {
            error!(
                method = %request.method(),
                path = %request.uri().path(),
                %fault,
                "authentication secret missing; check secret provisioning"
            );
            AuthError::Misconfigured.into_response()
        }
    }
}
