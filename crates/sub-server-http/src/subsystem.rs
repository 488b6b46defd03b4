// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! HTTP server subsystem implementing the `Subsystem` trait.
//!
//! This module provides `HttpSubsystem` which manages the lifecycle of the
//! HTTP server, including startup, health monitoring, and graceful shutdown.

use std::{
	net::SocketAddr,
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
};

use msgring_runtime::SharedRuntime;
use msgring_sub_api::{HealthStatus, Subsystem};
use msgring_type::{Error, Result};
use parking_lot::RwLock;
use tokio::{net::TcpListener, sync::oneshot};

use crate::{config::HttpConfig, routes::router, state::AppState};

/// HTTP server subsystem.
///
/// # Example
///
/// ```ignore
/// let mut http = HttpSubsystem::new(HttpConfig::default(), state, runtime);
///
/// http.start()?;
/// // Server is now accepting connections
///
/// http.shutdown()?;
/// // In-flight requests have drained and the listener is closed
/// ```
pub struct HttpSubsystem {
	config: HttpConfig,
	/// Actual bound address (available after start).
	actual_addr: RwLock<Option<SocketAddr>>,
	state: AppState,
	running: Arc<AtomicBool>,
	shutdown_tx: Option<oneshot::Sender<()>>,
	shutdown_complete_rx: Option<oneshot::Receiver<()>>,
	runtime: SharedRuntime,
}

impl HttpSubsystem {
	pub fn new(config: HttpConfig, state: AppState, runtime: SharedRuntime) -> Self {
		Self {
			config,
			actual_addr: RwLock::new(None),
			state,
			running: Arc::new(AtomicBool::new(false)),
			shutdown_tx: None,
			shutdown_complete_rx: None,
			runtime,
		}
	}

	/// Get the actual bound address (available after start).
	pub fn local_addr(&self) -> Option<SocketAddr> {
		*self.actual_addr.read()
	}

	/// Get the actual bound port (available after start).
	pub fn port(&self) -> Option<u16> {
		self.local_addr().map(|a| a.port())
	}
}

impl Subsystem for HttpSubsystem {
	fn name(&self) -> &'static str {
		"Http"
	}

	fn start(&mut self) -> Result<()> {
		if self.shutdown_tx.is_some() {
			return Ok(());
		}

		let addr = self.config.bind_addr.clone();
		let listener = self.runtime.block_on(TcpListener::bind(&addr)).map_err(|source| Error::BindFailed {
			addr: addr.clone(),
			source,
		})?;

		let actual_addr = listener.local_addr().map_err(Error::AddressUnavailable)?;
		*self.actual_addr.write() = Some(actual_addr);
		tracing::info!("HTTP server bound to {}", actual_addr);

		let (shutdown_tx, shutdown_rx) = oneshot::channel();
		let (complete_tx, complete_rx) = oneshot::channel();

		let app = router(self.state.clone(), &self.config);
		let running = self.running.clone();

		self.runtime.spawn(async move {
			running.store(true, Ordering::SeqCst);

			let server = axum::serve(listener, app).with_graceful_shutdown(async {
				shutdown_rx.await.ok();
				tracing::info!("HTTP server received shutdown signal");
			});

			if let Err(e) = server.await {
				tracing::error!("HTTP server error: {}", e);
			}

			running.store(false, Ordering::SeqCst);
			let _ = complete_tx.send(());
			tracing::info!("HTTP server stopped");
		});

		self.shutdown_tx = Some(shutdown_tx);
		self.shutdown_complete_rx = Some(complete_rx);
		Ok(())
	}

	fn shutdown(&mut self) -> Result<()> {
		if let Some(tx) = self.shutdown_tx.take() {
			let _ = tx.send(());
		}
		if let Some(rx) = self.shutdown_complete_rx.take() {
			let grace = self.config.shutdown_timeout;
			// the timer has to be created on the runtime, not the caller's thread
			let drained = self.runtime.block_on(async move { tokio::time::timeout(grace, rx).await });
			if drained.is_err() {
				tracing::warn!("HTTP server did not drain within {:?}", grace);
				return Err(Error::ShutdownTimeout {
					grace,
				});
			}
		}
		Ok(())
	}

	fn is_running(&self) -> bool {
		self.running.load(Ordering::SeqCst)
	}

	fn health_status(&self) -> HealthStatus {
		if self.running.load(Ordering::SeqCst) {
			HealthStatus::Healthy
		} else if self.shutdown_tx.is_some() {
			HealthStatus::Warning {
				description: "Starting up".to_string(),
			}
		} else {
			HealthStatus::Failed {
				description: "Not running".to_string(),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::{sync::Arc, time::Duration};

	use msgring_core::{MessageService, RingStore};

	use super::*;

	fn subsystem() -> HttpSubsystem {
		let config = HttpConfig::default().bind_addr("127.0.0.1:0").shutdown_timeout(Duration::from_secs(2));
		let state = AppState::new(MessageService::new(Arc::new(RingStore::new())));
		HttpSubsystem::new(config, state, SharedRuntime::new(1).unwrap())
	}

	#[test]
	fn test_start_and_shutdown_from_plain_thread() {
		let mut http = subsystem();
		http.start().unwrap();
		assert_ne!(http.port(), Some(0));

		http.shutdown().unwrap();
		assert!(!http.is_running());
	}

	#[test]
	fn test_shutdown_before_start_is_noop() {
		let mut http = subsystem();
		http.shutdown().unwrap();
		assert!(!http.health_status().is_healthy());
	}
}
