// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication secrets and their startup-time resolution.
//!
//! Secrets are resolved exactly once in `main` through a [`SecretStore`] and
//! then shared read-only by every request. An empty secret means "not
//! provisioned"; the validators turn that into a configuration error instead
//! of accepting requests.

use std::fmt;
use std::fs;

use crate::config::{
    INTERNAL_AUTH_TOKEN_ENV, INTERNAL_AUTH_TOKEN_PATH_ENV, SLACK_SIGNING_SECRET_ENV,
    SLACK_SIGNING_SECRET_PATH_ENV,
};

/// Secrets consumed by the authentication gateway.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secrets {
    internal_auth_token: String,
    signing_secret: String,
}

impl Secrets {
    pub fn new(internal_auth_token: impl Into<String>, signing_secret: impl Into<String>) -> Self {
        Self {
            internal_auth_token: internal_auth_token.into(),
            signing_secret: signing_secret.into(),
        }
    }

    pub fn internal_auth_token(&self) -> &str {
        &self.internal_auth_token
    }

    pub fn signing_secret(&self) -> &str {
        &self.signing_secret
    }

    pub fn has_internal_auth_token(&self) -> bool {
        !self.internal_auth_token.is_empty()
    }

    pub fn has_signing_secret(&self) -> bool {
        !self.signing_secret.is_empty()
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("internal_auth_token", &redacted(&self.internal_auth_token))
            .field("signing_secret", &redacted(&self.signing_secret))
            .finish()
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<REDACTED>"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SecretStoreError {
    #[error("failed to read secret file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("secret file is empty: {0}")]
    EmptyFile(String),
}

/// Startup-only provider of [`Secrets`].
pub trait SecretStore {
    fn resolve(&self) -> Result<Secrets, SecretStoreError>;
}

/// Secrets already known at construction time.
#[derive(Debug, Clone)]
pub struct StaticSecretStore(pub Secrets);

impl SecretStore for StaticSecretStore {
    fn resolve(&self) -> Result<Secrets, SecretStoreError> {
        Ok(self.0.clone())
    }
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolves secrets from environment variables.
///
/// For each secret the literal variable wins (`INTERNAL_AUTH_TOKEN`,
/// `SLACK_SIGNING_SECRET`); otherwise the file named by the matching
/// `*_PATH` variable is read and trimmed. Neither set leaves the secret
/// empty.
pub struct EnvSecretStore {
    lookup: Lookup,
}

impl EnvSecretStore {
    pub fn new() -> Self {
        Self::with_lookup(|name| std::env::var(name).ok())
    }

    /// Use a custom variable lookup instead of the process environment.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
        }
    }

    fn var(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn literal_or_file(&self, literal: &str, path_var: &str) -> Result<String, SecretStoreError> {
        if let Some(value) = self.var(literal) {
            return Ok(value);
        }

        let Some(path) = self.var(path_var) else {
            return Ok(String::new());
        };

        let contents = fs::read_to_string(&path).map_err(|source| SecretStoreError::Unreadable {
            path: path.clone(),
            source,
        })?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Err(SecretStoreError::EmptyFile(path));
        }
        Ok(trimmed.to_string())
    }
}

impl Default for EnvSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for EnvSecretStore {
    fn resolve(&self) -> Result<Secrets, SecretStoreError> {
        let internal_auth_token =
            self.literal_or_file(INTERNAL_AUTH_TOKEN_ENV, INTERNAL_AUTH_TOKEN_PATH_ENV)?;
        let signing_secret =
            self.literal_or_file(SLACK_SIGNING_SECRET_ENV, SLACK_SIGNING_SECRET_PATH_ENV)?;
        Ok(Secrets {
            internal_auth_token,
            signing_secret,
        })
    }
}
