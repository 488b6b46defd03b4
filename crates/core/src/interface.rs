// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use msgring_type::{Message, Result};

/// Durable store that receives a copy of every accepted message.
///
/// The in-memory ring stays authoritative for reads; a mirror only adds
/// durability and may assign the message id.
pub trait MessageMirror: Send + Sync {
	/// Persists `message` and returns the id the store assigned to it, if any.
	fn create(&self, message: &Message) -> Result<Option<u64>>;

	/// Liveness probe.
	fn ping(&self) -> Result<()>;

	/// Brings the schema up to date. Must be idempotent.
	fn migrate(&self) -> Result<()>;
}
