// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Replibot API - private API surface behind a request authentication gateway
//!
//! Internal services call in with a shared token; Slack delivers webhook
//! callbacks signed with HMAC-SHA256. Every guarded request must prove its
//! origin under exactly one of those schemes before it reaches a handler.
//!
//! ## Modules
//!
//! - `api` - HTTP routes (Axum)
//! - `auth` - Authentication gateway, validators and middleware
//! - `config` - Environment configuration
//! - `logging` - Tracing subscriber setup

pub mod api;
pub mod auth;
pub mod config;
pub mod logging;
pub mod state;
