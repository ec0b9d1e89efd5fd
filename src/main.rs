// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::error::Error;

use replibot_api::{
    api::router,
    auth::{AuthenticationGateway, EnvSecretStore, SecretStore},
    config::Config,
    logging,
    state::AppState,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    logging::init(config.log_format);

    // Secrets are resolved once; a missing one is reported per request, not fatal here.
    let secrets = EnvSecretStore::new().resolve()?;
    if !secrets.has_internal_auth_token() {
        error!("internal auth token not configured; internal callers will receive 500");
    }
    if !secrets.has_signing_secret() {
        error!("Slack signing secret not configured; webhook callbacks will receive 500");
    }

    let state = AppState::new(AuthenticationGateway::new(secrets))
        .with_max_body_bytes(config.max_body_bytes)
        .with_release_version(config.release_version.clone());
    let app = router(state);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, version = %config.release_version, "Replibot API listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
