// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! HTTP endpoint handlers.
//!
//! This module provides the request handlers for:
//! - `/message` - Store a message
//! - `/messages` - List the most recent messages
//! - `/healthcheck` - Liveness probe

use axum::{
	Json,
	body::Bytes,
	extract::State,
	http::{StatusCode, header},
	response::{IntoResponse, Response},
};
use msgring_type::Message;
use serde::{Deserialize, Serialize};
use tower::BoxError;

use crate::{error::AppError, state::AppState};

/// Request body for `POST /message`.
///
/// Both fields are required; unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
	pub msg: String,
	pub ts: i64,
}

impl From<CreateMessageRequest> for Message {
	fn from(request: CreateMessageRequest) -> Self {
		Message::new(request.msg, request.ts)
	}
}

/// Status envelope shared by successful writes and all failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
	#[serde(rename = "Status")]
	pub status: String,
	#[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl StatusResponse {
	pub fn ok() -> Self {
		Self {
			status: "ok".to_string(),
			error: None,
		}
	}

	pub fn nok() -> Self {
		Self {
			status: "nok".to_string(),
			error: None,
		}
	}

	pub fn nok_with(error: impl Into<String>) -> Self {
		Self {
			status: "nok".to_string(),
			error: Some(error.into()),
		}
	}

	pub fn is_ok(&self) -> bool {
		self.status == "ok"
	}
}

/// Store a message.
///
/// The body is decoded regardless of its declared content type.
///
/// # Request Body
///
/// ```json
/// {"msg": "hello", "ts": 1000}
/// ```
///
/// # Response
///
/// `201 {"Status":"ok"}`, `422 {"Status":"nok"}` for an undecodable body,
/// `400 {"Status":"nok"}` when the store rejects the write.
pub async fn create_message(
	State(state): State<AppState>,
	body: Bytes,
) -> Result<(StatusCode, Json<StatusResponse>), AppError> {
	let request: CreateMessageRequest = serde_json::from_slice(&body).map_err(AppError::MalformedInput)?;

	// runs to completion even if the client goes away and this future is dropped
	let service = state.service().clone();
	tokio::task::spawn_blocking(move || service.create(request.into()))
		.await
		.map_err(|e| AppError::TaskPanic(e.to_string()))??;

	Ok((StatusCode::CREATED, Json(StatusResponse::ok())))
}

/// List the most recent messages, newest first.
///
/// # Response
///
/// ```json
/// [{"msg": "second", "ts": 1001}, {"msg": "first", "ts": 1000}]
/// ```
pub async fn list_messages(State(state): State<AppState>) -> Result<Response, AppError> {
	let messages = state.service().list();
	let body = serde_json::to_vec(&messages).map_err(AppError::Encoding)?;

	Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Health check endpoint.
///
/// Pings the durable mirror when one is configured.
pub async fn healthcheck(State(state): State<AppState>) -> Result<Json<StatusResponse>, AppError> {
	let service = state.service().clone();
	tokio::task::spawn_blocking(move || service.ping())
		.await
		.map_err(|e| AppError::TaskPanic(e.to_string()))?
		.map_err(AppError::Unhealthy)?;

	Ok(Json(StatusResponse::ok()))
}

pub async fn not_found() -> AppError {
	AppError::NotFound
}

/// Maps middleware failures (timeouts) onto the shared error envelope.
pub async fn handle_middleware_error(err: BoxError) -> AppError {
	if err.is::<tower::timeout::error::Elapsed>() {
		AppError::Timeout
	} else {
		AppError::Internal(err.to_string())
	}
}
