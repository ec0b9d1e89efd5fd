// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for the echo route.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EchoRequest {
    /// Value echoed back to the caller.
    pub name: String,
}

/// Returned when the body is not a valid [`EchoRequest`].
#[derive(Debug, Serialize, ToSchema)]
pub struct MalformedEcho {
    pub error: String,
}

type MalformedResponse = (StatusCode, Json<MalformedEcho>);

fn malformed(rejection: JsonRejection) -> MalformedResponse {
    (
        rejection.status(),
        Json(MalformedEcho {
            error: rejection.body_text(),
        }),
    )
}

/// Echo back the `name` field of the request.
///
/// Requires either `X-Replicated-InternalToken` or a Slack-style signature.
#[utoipa::path(
    post,
    path = "/api/v1/echo",
    tag = "Example",
    request_body = EchoRequest,
    responses(
        (status = 201, description = "Echoed name", body = String),
        (status = 400, description = "Body is not valid JSON", body = MalformedEcho),
        (status = 415, description = "Missing JSON content type", body = MalformedEcho),
        (status = 422, description = "JSON does not match EchoRequest", body = MalformedEcho),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 500, description = "Authentication secret not provisioned")
    )
)]
pub async fn echo(
    payload: Result<Json<EchoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<String>), MalformedResponse> {
    let Json(request) = payload.map_err(malformed)?;
    Ok((StatusCode::CREATED, Json(request.name)))
}
