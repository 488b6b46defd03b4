// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::PathBuf;

use msgring_type::{Error, Result};

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbPath {
	File(PathBuf),
	Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
	pub path: DbPath,
	/// Milliseconds a writer waits on a locked database before failing.
	pub busy_timeout_ms: u64,
}

impl SqliteConfig {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: DbPath::File(path.into()),
			busy_timeout_ms: 5_000,
		}
	}

	pub fn in_memory() -> Self {
		Self {
			path: DbPath::Memory,
			busy_timeout_ms: 5_000,
		}
	}

	/// Parses a database url such as `sqlite3://messages.db` or `sqlite3://:memory:`.
	///
	/// Only SQLite is supported; other well-formed schemes yield
	/// [`Error::UnsupportedDatabase`].
	pub fn from_url(url: &str) -> Result<Self> {
		let invalid = |reason: &str| Error::InvalidDatabaseUrl {
			url: url.to_string(),
			reason: reason.to_string(),
		};

		let (scheme, rest) = url.split_once("://").ok_or_else(|| invalid("missing scheme"))?;
		match scheme {
			"sqlite" | "sqlite3" => match rest {
				"" => Err(invalid("missing database path")),
				":memory:" => Ok(Self::in_memory()),
				path => Ok(Self::new(path)),
			},
			"" => Err(invalid("missing scheme")),
			other => Err(Error::UnsupportedDatabase {
				scheme: other.to_string(),
			}),
		}
	}
}
