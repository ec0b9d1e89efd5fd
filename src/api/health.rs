// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "ok" while the process is serving.
    pub status: String,
    /// Release version from `RELEASE_VERSION`.
    pub version: String,
    /// Secret provisioning status.
    pub checks: HealthChecks,
}

/// Whether each authentication secret is provisioned ("configured" or
/// "missing"). Values are never reported.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    pub internal_token: String,
    pub signing_secret: String,
}

fn provisioned(present: bool) -> String {
    let status = if present { "configured" } else { "missing" };
    status.to_string()
}

/// Health check endpoint handler.
///
/// Always returns 200; a missing secret only affects guarded routes.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let secrets = state.gateway.secrets();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: state.release_version.to_string(),
        checks: HealthChecks {
            internal_token: provisioned(secrets.has_internal_auth_token()),
            signing_secret: provisioned(secrets.has_signing_secret()),
        },
    })
}
