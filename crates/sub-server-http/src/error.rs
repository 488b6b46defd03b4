// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! HTTP error handling and response formatting.
//!
//! Every failure is answered with a [`StatusResponse`] JSON body so clients
//! only have to understand one envelope.

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};

use crate::handlers::StatusResponse;

/// Application error type that converts to HTTP responses.
#[derive(Debug)]
pub enum AppError {
	/// Request body is not a valid message.
	MalformedInput(serde_json::Error),
	/// The message service rejected the operation.
	Store(msgring_type::Error),
	/// Response serialization failed.
	Encoding(serde_json::Error),
	/// The durable mirror failed its liveness probe.
	Unhealthy(msgring_type::Error),
	/// A blocking task panicked or was cancelled.
	TaskPanic(String),
	/// Request took longer than the configured timeout.
	Timeout,
	/// Unknown route, or a known route with the wrong method.
	NotFound,
	/// Unclassified middleware failure.
	Internal(String),
}

impl From<msgring_type::Error> for AppError {
	fn from(e: msgring_type::Error) -> Self {
		AppError::Store(e)
	}
}

impl std::fmt::Display for AppError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AppError::MalformedInput(e) => write!(f, "Malformed input: {}", e),
			AppError::Store(e) => write!(f, "Store error: {}", e),
			AppError::Encoding(e) => write!(f, "Encoding error: {}", e),
			AppError::Unhealthy(e) => write!(f, "Unhealthy: {}", e),
			AppError::TaskPanic(msg) => write!(f, "Task panicked: {}", msg),
			AppError::Timeout => f.write_str("Request timed out"),
			AppError::NotFound => f.write_str("Not found"),
			AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
		}
	}
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		let (status, body) = match &self {
			AppError::MalformedInput(e) => {
				tracing::debug!("Rejected malformed message: {}", e);
				(StatusCode::UNPROCESSABLE_ENTITY, StatusResponse::nok())
			}
			AppError::Store(e) => {
				// detail stays in the log, the client only learns the write failed
				tracing::error!("Message store failure: {}", e);
				(StatusCode::BAD_REQUEST, StatusResponse::nok())
			}
			AppError::Encoding(e) => {
				tracing::error!("Failed to encode response: {}", e);
				(StatusCode::INTERNAL_SERVER_ERROR, StatusResponse::nok_with(e.to_string()))
			}
			AppError::Unhealthy(e) => {
				tracing::warn!("Health check failed: {}", e);
				(StatusCode::BAD_REQUEST, StatusResponse::nok_with(e.to_string()))
			}
			AppError::TaskPanic(msg) => {
				tracing::error!("Request task panicked: {}", msg);
				(StatusCode::INTERNAL_SERVER_ERROR, StatusResponse::nok_with("Internal server error"))
			}
			AppError::Timeout => (StatusCode::REQUEST_TIMEOUT, StatusResponse::nok_with("Request timed out")),
			AppError::NotFound => (StatusCode::NOT_FOUND, StatusResponse::nok_with("Not found")),
			AppError::Internal(msg) => {
				tracing::error!("Internal error: {}", msg);
				(StatusCode::INTERNAL_SERVER_ERROR, StatusResponse::nok_with("Internal server error"))
			}
		};

		(status, Json(body)).into_response()
	}
}
