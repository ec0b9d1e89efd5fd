// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `MAX_BODY_BYTES` | Body limit on authenticated routes | `1048576` |
//! | `RELEASE_VERSION` | Version reported by `/healthz` | empty |
//! | `INTERNAL_AUTH_TOKEN` | Shared token for internal callers | unset |
//! | `INTERNAL_AUTH_TOKEN_PATH` | File holding the internal token | unset |
//! | `SLACK_SIGNING_SECRET` | Webhook signing secret | unset |
//! | `SLACK_SIGNING_SECRET_PATH` | File holding the signing secret | unset |

use std::net::SocketAddr;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const MAX_BODY_BYTES_ENV: &str = "MAX_BODY_BYTES";
pub const RELEASE_VERSION_ENV: &str = "RELEASE_VERSION";

/// Shared token presented by internal callers in `X-Replicated-InternalToken`.
pub const INTERNAL_AUTH_TOKEN_ENV: &str = "INTERNAL_AUTH_TOKEN";
pub const INTERNAL_AUTH_TOKEN_PATH_ENV: &str = "INTERNAL_AUTH_TOKEN_PATH";

/// Secret used to verify `X-Slack-Signature` on webhook callbacks.
pub const SLACK_SIGNING_SECRET_ENV: &str = "SLACK_SIGNING_SECRET";
pub const SLACK_SIGNING_SECRET_PATH_ENV: &str = "SLACK_SIGNING_SECRET_PATH";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Default body limit for authenticated routes (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Process configuration, excluding secrets (see `auth::secrets`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub max_body_bytes: usize,
    pub release_version: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match var(PORT_ENV) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV,
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let log_format = match var(LOG_FORMAT_ENV).map(|v| v.to_ascii_lowercase()) {
            None => LogFormat::default(),
            Some(value) => match value.as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: LOG_FORMAT_ENV,
                        value,
                    })
                }
            },
        };

        let max_body_bytes = match var(MAX_BODY_BYTES_ENV) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: MAX_BODY_BYTES_ENV,
                value,
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            host,
            port,
            log_format,
            max_body_bytes,
            release_version: var(RELEASE_VERSION_ENV).unwrap_or_default(),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: HOST_ENV,
                value: self.host.clone(),
            })
    }
}
