// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use msgring_store_ring::RingStore;
use msgring_type::{Message, Result};
use tracing::{debug, instrument};

use crate::interface::MessageMirror;

/// Entry point for creating and listing messages.
///
/// Cheap to clone; clones share the same ring and mirror.
#[derive(Clone)]
pub struct MessageService {
	ring: Arc<RingStore>,
	mirror: Option<Arc<dyn MessageMirror>>,
}

impl MessageService {
	pub fn new(ring: Arc<RingStore>) -> Self {
		Self {
			ring,
			mirror: None,
		}
	}

	pub fn with_mirror(mut self, mirror: Arc<dyn MessageMirror>) -> Self {
		self.mirror = Some(mirror);
		self
	}

	pub fn has_mirror(&self) -> bool {
		self.mirror.is_some()
	}

	/// Accepts a message.
	///
	/// With a mirror configured the message is persisted first. If that fails
	/// the ring is left untouched and the error is returned, so a message is
	/// either fully accepted or not at all.
	#[instrument(name = "service::create", level = "debug", skip_all, fields(ts = message.timestamp))]
	pub fn create(&self, mut message: Message) -> Result<()> {
		if let Some(mirror) = &self.mirror {
			if let Some(id) = mirror.create(&message)? {
				message.id = Some(id);
			}
		}
		self.ring.create(message);
		debug!(written = self.ring.written(), "message stored");
		Ok(())
	}

	/// Most recent messages, newest first.
	pub fn list(&self) -> Vec<Message> {
		self.ring.list()
	}

	pub fn ping(&self) -> Result<()> {
		match &self.mirror {
			Some(mirror) => mirror.ping(),
			None => Ok(()),
		}
	}

	pub fn migrate(&self) -> Result<()> {
		match &self.mirror {
			Some(mirror) => mirror.migrate(),
			None => Ok(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::{
		num::NonZeroUsize,
		sync::atomic::{AtomicBool, AtomicU64, Ordering},
	};

	use msgring_type::Error;
	use parking_lot::Mutex;

	use super::*;

	#[derive(Default)]
	struct RecordingMirror {
		next_id: AtomicU64,
		fail: AtomicBool,
		migrated: AtomicBool,
		created: Mutex<Vec<Message>>,
	}

	impl MessageMirror for RecordingMirror {
		fn create(&self, message: &Message) -> Result<Option<u64>> {
			if self.fail.load(Ordering::SeqCst) {
				return Err(Error::mirror("mirror offline"));
			}
			self.created.lock().push(message.clone());
			Ok(Some(self.next_id.fetch_add(1, Ordering::SeqCst) + 1))
		}

		fn ping(&self) -> Result<()> {
			if self.fail.load(Ordering::SeqCst) {
				return Err(Error::mirror("mirror offline"));
			}
			Ok(())
		}

		fn migrate(&self) -> Result<()> {
			self.migrated.store(true, Ordering::SeqCst);
			Ok(())
		}
	}

	fn service(capacity: usize) -> MessageService {
		MessageService::new(Arc::new(RingStore::with_capacity(NonZeroUsize::new(capacity).unwrap())))
	}

	#[test]
	fn test_create_then_list() {
		let service = service(100);
		service.create(Message::new("hello", 1000)).unwrap();

		assert_eq!(service.list(), vec![Message::new("hello", 1000)]);
	}

	#[test]
	fn test_list_respects_capacity() {
		let service = service(3);
		for ts in 1..=5 {
			service.create(Message::new("m", ts)).unwrap();
		}

		let listed: Vec<i64> = service.list().iter().map(|m| m.timestamp).collect();
		assert_eq!(listed, vec![5, 4, 3]);
	}

	#[test]
	fn test_without_mirror_ping_and_migrate_succeed() {
		let service = service(1);
		assert!(!service.has_mirror());
		service.ping().unwrap();
		service.migrate().unwrap();
	}

	#[test]
	fn test_mirror_assigns_id() {
		let mirror = Arc::new(RecordingMirror::default());
		let service = service(10).with_mirror(mirror.clone());

		service.create(Message::new("a", 1)).unwrap();
		service.create(Message::new("b", 2)).unwrap();

		let ids: Vec<_> = service.list().iter().map(|m| m.id).collect();
		assert_eq!(ids, vec![Some(2), Some(1)]);
		assert_eq!(mirror.created.lock().len(), 2);
	}

	#[test]
	fn test_mirror_failure_leaves_ring_unchanged() {
		let mirror = Arc::new(RecordingMirror::default());
		let service = service(10).with_mirror(mirror.clone());
		service.create(Message::new("kept", 1)).unwrap();

		mirror.fail.store(true, Ordering::SeqCst);
		let err = service.create(Message::new("dropped", 2)).unwrap_err();

		assert!(matches!(err, Error::Mirror(_)));
		assert_eq!(service.list().len(), 1);
		assert_eq!(service.list()[0].text, "kept");
		assert!(service.ping().is_err());
	}

	#[test]
	fn test_migrate_delegates_to_mirror() {
		let mirror = Arc::new(RecordingMirror::default());
		let service = service(1).with_mirror(mirror.clone());

		service.migrate().unwrap();
		assert!(mirror.migrated.load(Ordering::SeqCst));
	}

	#[test]
	fn test_clones_share_state() {
		let service = service(10);
		let clone = service.clone();
		clone.create(Message::new("shared", 1)).unwrap();

		assert_eq!(service.list().len(), 1);
	}
}
