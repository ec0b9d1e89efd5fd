// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors returned at the HTTP boundary.
//!
//! Responses are deliberately generic. The specific [`Rejection`] or
//! [`ConfigFault`] is logged by the middleware and never sent to the caller.
//!
//! [`Rejection`]: super::Rejection
//! [`ConfigFault`]: super::ConfigFault

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Credentials missing or invalid
    #[error("Unauthorized")]
    Unauthorized,
    /// Required secret is not provisioned on this deployment
    #[error("Internal server error")]
    Misconfigured,
    /// Request body could not be buffered for verification
    #[error("Request body could not be read")]
    UnreadableBody,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Unauthorized => "unauthorized",
            AuthError::Misconfigured => "internal_error",
            AuthError::UnreadableBody => "unreadable_body",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::UnreadableBody => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
