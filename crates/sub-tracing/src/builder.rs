// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use crate::subsystem::TracingSubsystem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
	#[default]
	Text,
	Json,
}

impl FromStr for LogFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"text" => Ok(LogFormat::Text),
			"json" => Ok(LogFormat::Json),
			other => Err(format!("unknown log format `{other}`, expected `text` or `json`")),
		}
	}
}

impl Display for LogFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			LogFormat::Text => f.write_str("text"),
			LogFormat::Json => f.write_str("json"),
		}
	}
}

/// Builder for the tracing subsystem.
///
/// A `RUST_LOG` environment variable, when present, takes precedence over the
/// configured level.
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	pub(crate) level: String,
	pub(crate) format: LogFormat,
	pub(crate) ansi: bool,
	pub(crate) target: bool,
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Text,
			ansi: true,
			target: true,
		}
	}

	/// Filter directive, e.g. `debug` or `msgring=trace,tower_http=debug`.
	pub fn level(mut self, level: impl Into<String>) -> Self {
		self.level = level.into();
		self
	}

	pub fn format(mut self, format: LogFormat) -> Self {
		self.format = format;
		self
	}

	pub fn ansi(mut self, ansi: bool) -> Self {
		self.ansi = ansi;
		self
	}

	pub fn with_target(mut self, target: bool) -> Self {
		self.target = target;
		self
	}

	pub fn build(self) -> TracingSubsystem {
		TracingSubsystem::new(self)
	}
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}
