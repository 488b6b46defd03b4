// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! HTTP server subsystem for the message ring.
//!
//! This crate provides an Axum-based HTTP server that exposes a
//! [`MessageService`](msgring_core::MessageService). It runs on the shared
//! tokio runtime and implements the `Subsystem` trait for lifecycle
//! management.
//!
//! # Endpoints
//!
//! - `POST /message` - Store a message, body `{"msg": string, "ts": int64}`
//! - `GET /messages` - Most recent messages, newest first
//! - `GET /healthcheck` - Liveness probe, including the durable mirror if any
//!
//! Any other method on these paths, and any other path, answers 404. Every
//! failure is reported with the same `{"Status":"nok"}` JSON envelope.
//!
//! # Example
//!
//! ```ignore
//! use msgring_core::{MessageService, RingStore};
//! use msgring_runtime::SharedRuntime;
//! use msgring_sub_server_http::{AppState, HttpConfig, HttpSubsystem};
//!
//! let runtime = SharedRuntime::new(4)?;
//! let service = MessageService::new(Arc::new(RingStore::new()));
//!
//! let mut http = HttpSubsystem::new(HttpConfig::default().bind_addr("0.0.0.0:8090"), AppState::new(service), runtime);
//! http.start()?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod subsystem;

pub use config::HttpConfig;
pub use error::AppError;
pub use handlers::{CreateMessageRequest, StatusResponse};
pub use routes::router;
pub use state::AppState;
pub use subsystem::HttpSubsystem;
