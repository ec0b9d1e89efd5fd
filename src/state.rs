// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{AuthenticationGateway, Secrets};
use crate::config::DEFAULT_MAX_BODY_BYTES;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<AuthenticationGateway>,
    /// Upper bound on bodies buffered for signature verification.
    pub max_body_bytes: usize,
    pub release_version: Arc<str>,
}

impl AppState {
    pub fn new(gateway: AuthenticationGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            release_version: Arc::from(""),
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn with_release_version(mut self, version: impl Into<String>) -> Self {
        self.release_version = Arc::from(version.into());
        self
    }
}

impl Default for AppState {
    /// State with no secrets provisioned; every guarded request fails closed.
    fn default() -> Self {
        Self::new(AuthenticationGateway::new(Secrets::default()))
    }
}
