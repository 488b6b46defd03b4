// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{io, time::Duration};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("durable mirror failure: {0}")]
	Mirror(#[source] BoxError),

	#[error("unsupported database scheme `{scheme}`")]
	UnsupportedDatabase {
		scheme: String,
	},

	#[error("invalid database url `{url}`: {reason}")]
	InvalidDatabaseUrl {
		url: String,
		reason: String,
	},

	#[error("failed to bind {addr}: {source}")]
	BindFailed {
		addr: String,
		#[source]
		source: io::Error,
	},

	#[error("bound address unavailable: {0}")]
	AddressUnavailable(#[source] io::Error),

	#[error("server did not stop within {grace:?}")]
	ShutdownTimeout {
		grace: Duration,
	},

	#[error("runtime failure: {0}")]
	Runtime(#[source] io::Error),

	#[error("tracing setup failed: {0}")]
	Tracing(String),
}

impl Error {
	pub fn mirror(err: impl Into<BoxError>) -> Self {
		Error::Mirror(err.into())
	}
}
