// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared tokio runtime used by every subsystem of a process.

use std::{future::Future, sync::Arc};

use msgring_type::{Error, Result};
use tokio::{
	runtime::{self, Runtime},
	task::JoinHandle,
};

/// Cloneable handle to a multi-threaded tokio runtime.
///
/// The runtime is shut down when the last clone is dropped.
#[derive(Clone)]
pub struct SharedRuntime {
	runtime: Arc<Runtime>,
}

impl SharedRuntime {
	/// Create a runtime with `worker_threads` workers (at least one).
	pub fn new(worker_threads: usize) -> Result<Self> {
		let runtime = runtime::Builder::new_multi_thread()
			.worker_threads(worker_threads.max(1))
			.thread_name("msgring-worker")
			.enable_all()
			.build()
			.map_err(Error::Runtime)?;

		Ok(Self {
			runtime: Arc::new(runtime),
		})
	}

	pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
	where
		F: Future + Send + 'static,
		F::Output: Send + 'static,
	{
		self.runtime.spawn(future)
	}

	/// Drive `future` to completion on the calling thread.
	///
	/// Must not be called from inside the runtime's own worker threads.
	pub fn block_on<F: Future>(&self, future: F) -> F::Output {
		self.runtime.block_on(future)
	}
}
