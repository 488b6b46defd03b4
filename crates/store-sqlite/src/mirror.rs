// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use msgring_core::MessageMirror;
use msgring_type::{Error, Message, Result};
use parking_lot::Mutex;
use rusqlite::{Connection, params};
use tracing::{info, instrument};

use crate::config::{DbPath, SqliteConfig};

const MIGRATION: &str = "
CREATE TABLE IF NOT EXISTS messages (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    message    TEXT    NOT NULL,
    timestamp  INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_messages_timestamp ON messages (timestamp);
";

/// Durable copy of accepted messages in a single SQLite table.
pub struct SqliteMirror {
	conn: Mutex<Connection>,
}

impl SqliteMirror {
	#[instrument(name = "store::sqlite::open", level = "info", skip(config), fields(db_path = ?config.path))]
	pub fn open(config: &SqliteConfig) -> Result<Self> {
		let conn = match &config.path {
			DbPath::File(path) => Connection::open(path),
			DbPath::Memory => Connection::open_in_memory(),
		}
		.map_err(Error::mirror)?;

		conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms)).map_err(Error::mirror)?;
		info!("sqlite mirror opened");

		Ok(Self {
			conn: Mutex::new(conn),
		})
	}

	pub fn in_memory() -> Result<Self> {
		Self::open(&SqliteConfig::in_memory())
	}

	/// Number of mirrored messages.
	pub fn count(&self) -> Result<u64> {
		let conn = self.conn.lock();
		let count: i64 =
			conn.query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0)).map_err(Error::mirror)?;
		Ok(count.max(0) as u64)
	}
}

impl MessageMirror for SqliteMirror {
	#[instrument(name = "store::sqlite::create", level = "trace", skip_all, fields(ts = message.timestamp))]
	fn create(&self, message: &Message) -> Result<Option<u64>> {
		let now = unix_now();
		let conn = self.conn.lock();
		conn.execute(
			"INSERT INTO messages (created_at, updated_at, message, timestamp) VALUES (?1, ?2, ?3, ?4)",
			params![now, now, message.text, message.timestamp],
		)
		.map_err(Error::mirror)?;
		Ok(u64::try_from(conn.last_insert_rowid()).ok())
	}

	fn ping(&self) -> Result<()> {
		let conn = self.conn.lock();
		conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)).map_err(Error::mirror)?;
		Ok(())
	}

	#[instrument(name = "store::sqlite::migrate", level = "info", skip_all)]
	fn migrate(&self) -> Result<()> {
		self.conn.lock().execute_batch(MIGRATION).map_err(Error::mirror)
	}
}

fn unix_now() -> i64 {
	SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or_default()
}
