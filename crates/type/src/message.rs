// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

/// A short text message tagged with a caller-supplied unix timestamp.
///
/// Messages are immutable once created. The `id` is only ever assigned by a
/// durable mirror and is omitted from the wire format while unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<u64>,
	#[serde(rename = "msg")]
	pub text: String,
	/// Unix seconds.
	#[serde(rename = "ts")]
	pub timestamp: i64,
}

impl Message {
	pub fn new(text: impl Into<String>, timestamp: i64) -> Self {
		Self {
			id: None,
			text: text.into(),
			timestamp,
		}
	}

	pub fn with_id(mut self, id: u64) -> Self {
		self.id = Some(id);
		self
	}
}
