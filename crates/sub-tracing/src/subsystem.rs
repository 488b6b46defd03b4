// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use msgring_sub_api::{HealthStatus, Subsystem};
use msgring_type::{Error, Result};
use tracing_subscriber::EnvFilter;

use crate::builder::{LogFormat, TracingBuilder};

/// Installs the process-wide tracing subscriber on start.
pub struct TracingSubsystem {
	config: TracingBuilder,
	running: bool,
}

impl TracingSubsystem {
	pub(crate) fn new(config: TracingBuilder) -> Self {
		Self {
			config,
			running: false,
		}
	}

	fn filter(&self) -> Result<EnvFilter> {
		match EnvFilter::try_from_default_env() {
			Ok(filter) => Ok(filter),
			Err(_) => EnvFilter::try_new(&self.config.level).map_err(|e| Error::Tracing(e.to_string())),
		}
	}
}

impl Subsystem for TracingSubsystem {
	fn name(&self) -> &'static str {
		"Tracing"
	}

	fn start(&mut self) -> Result<()> {
		if self.running {
			return Ok(());
		}

		let builder = tracing_subscriber::fmt()
			.with_env_filter(self.filter()?)
			.with_ansi(self.config.ansi)
			.with_target(self.config.target);

		let installed = match self.config.format {
			LogFormat::Text => builder.try_init(),
			LogFormat::Json => builder.json().try_init(),
		};
		installed.map_err(|e| Error::Tracing(e.to_string()))?;

		self.running = true;
		tracing::debug!(format = %self.config.format, "tracing initialized");
		Ok(())
	}

	fn shutdown(&mut self) -> Result<()> {
		self.running = false;
		Ok(())
	}

	fn is_running(&self) -> bool {
		self.running
	}

	fn health_status(&self) -> HealthStatus {
		if self.running {
			HealthStatus::Healthy
		} else {
			HealthStatus::Failed {
				description: "Not running".to_string(),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_invalid_level_is_rejected() {
		if std::env::var_os("RUST_LOG").is_some() {
			return;
		}
		let mut subsystem = TracingBuilder::new().level("msgring=notalevel").build();
		assert!(matches!(subsystem.start(), Err(Error::Tracing(_))));
		assert!(!subsystem.is_running());
	}

	#[test]
	fn test_not_running_before_start() {
		let subsystem = TracingBuilder::new().build();
		assert!(!subsystem.is_running());
		assert!(!subsystem.health_status().is_healthy());
	}
}
