// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

/// Configuration for the HTTP server subsystem.
#[derive(Debug, Clone)]
pub struct HttpConfig {
	/// Address and port to bind to, e.g. `0.0.0.0:80`.
	pub bind_addr: String,
	/// Requests processed concurrently; further requests wait for a slot.
	pub max_connections: usize,
	/// Upper bound for handling a single request.
	pub request_timeout: Duration,
	/// How long `shutdown` waits for in-flight requests to drain.
	pub shutdown_timeout: Duration,
}

impl Default for HttpConfig {
	fn default() -> Self {
		Self {
			bind_addr: "0.0.0.0:80".to_string(),
			max_connections: 1024,
			request_timeout: Duration::from_secs(30),
			shutdown_timeout: Duration::from_secs(5),
		}
	}
}

impl HttpConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
		self.bind_addr = addr.into();
		self
	}

	pub fn max_connections(mut self, max: usize) -> Self {
		self.max_connections = max.max(1);
		self
	}

	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
		self.shutdown_timeout = timeout;
		self
	}
}
