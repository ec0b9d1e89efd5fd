// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth::require_auth_tokens, state::AppState};

pub mod echo;
pub mod health;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/echo", post(echo::echo))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth_tokens,
        ));

    Router::new()
        .route("/healthz", get(health::healthz))
        .nest("/api/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    paths(health::healthz, echo::echo),
    components(schemas(
        health::HealthResponse,
        health::HealthChecks,
        echo::EchoRequest,
        echo::MalformedEcho
    )),
    tags(
        (name = "Health", description = "Liveness and secret provisioning status"),
        (name = "Example", description = "Authenticated example routes")
    )
)]
struct ApiDoc;
