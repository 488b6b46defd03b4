// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::num::NonZeroUsize;

use msgring_type::Message;
use parking_lot::Mutex;
use tracing::instrument;

pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// Bounded, internally synchronized circular buffer of [`Message`]s.
///
/// All mutation and snapshot reads go through a single mutex. The critical
/// section is limited to index arithmetic plus one slot write or one window
/// copy; callers encode and ship the snapshot after the lock is released.
#[derive(Debug)]
pub struct RingStore {
	capacity: NonZeroUsize,
	inner: Mutex<Ring>,
}

#[derive(Debug)]
struct Ring {
	/// Fixed-length arena. A slot is `None` until it is written for the first time.
	slots: Box<[Option<Message>]>,
	/// Slot holding the newest message; the next write lands one slot before it.
	cursor: usize,
	/// Total writes ever performed, not capped at capacity.
	written: u64,
}

impl RingStore {
	pub fn new() -> Self {
		Self::with_capacity(DEFAULT_CAPACITY)
	}

	pub fn with_capacity(capacity: NonZeroUsize) -> Self {
		let slots = std::iter::repeat_with(|| None).take(capacity.get()).collect();
		Self {
			capacity,
			inner: Mutex::new(Ring {
				slots,
				cursor: 0,
				written: 0,
			}),
		}
	}

	pub fn capacity(&self) -> usize {
		self.capacity.get()
	}

	/// Stores `message`, overwriting the oldest entry once the ring is full.
	///
	/// Never fails: capacity overflow is handled by overwrite.
	#[instrument(name = "store::ring::create", level = "trace", skip_all, fields(ts = message.timestamp))]
	pub fn create(&self, message: Message) {
		let capacity = self.capacity.get();
		let mut ring = self.inner.lock();
		let slot = (ring.cursor + capacity - 1) % capacity;
		ring.slots[slot] = Some(message);
		ring.cursor = slot;
		ring.written += 1;
	}

	/// Returns a consistent snapshot of the stored messages, newest first.
	///
	/// The result holds `min(written, capacity)` messages.
	#[instrument(name = "store::ring::list", level = "trace", skip_all)]
	pub fn list(&self) -> Vec<Message> {
		let capacity = self.capacity.get();
		let ring = self.inner.lock();
		let len = ring.len(capacity);
		let mut snapshot = Vec::with_capacity(len);
		for offset in 0..len {
			if let Some(message) = &ring.slots[(ring.cursor + offset) % capacity] {
				snapshot.push(message.clone());
			}
		}
		snapshot
	}

	/// Number of messages a [`list`](Self::list) call would return right now.
	pub fn len(&self) -> usize {
		self.inner.lock().len(self.capacity.get())
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Total writes since construction, including overwritten ones.
	pub fn written(&self) -> u64 {
		self.inner.lock().written
	}
}

impl Default for RingStore {
	fn default() -> Self {
		Self::new()
	}
}

impl Ring {
	fn len(&self, capacity: usize) -> usize {
		self.written.min(capacity as u64) as usize
	}
}

#[cfg(test)]
mod tests {
	use std::{
		collections::HashSet,
		sync::{
			Arc,
			atomic::{AtomicBool, Ordering},
		},
		thread,
	};

	use super::*;

	fn ring(capacity: usize) -> RingStore {
		RingStore::with_capacity(NonZeroUsize::new(capacity).unwrap())
	}

	fn timestamps(messages: &[Message]) -> Vec<i64> {
		messages.iter().map(|m| m.timestamp).collect()
	}

	#[test]
	fn test_empty_list() {
		let store = RingStore::new();
		assert!(store.list().is_empty());
		assert!(store.is_empty());
		assert_eq!(store.capacity(), 100);
	}

	#[test]
	fn test_single_message() {
		let store = RingStore::new();
		store.create(Message::new("hello", 1000));

		assert_eq!(store.list(), vec![Message::new("hello", 1000)]);
	}

	#[test]
	fn test_partial_fill_is_newest_first() {
		let store = ring(5);
		for ts in 1..=3 {
			store.create(Message::new(format!("m{ts}"), ts));
		}

		assert_eq!(timestamps(&store.list()), vec![3, 2, 1]);
		assert_eq!(store.len(), 3);
		assert_eq!(store.written(), 3);
	}

	#[test]
	fn test_exactly_full() {
		let store = ring(4);
		for ts in 1..=4 {
			store.create(Message::new("m", ts));
		}

		assert_eq!(timestamps(&store.list()), vec![4, 3, 2, 1]);
	}

	#[test]
	fn test_overwrite_keeps_last_capacity_messages() {
		let store = RingStore::new();
		for ts in 1..=150 {
			store.create(Message::new(format!("m{ts}"), ts));
		}

		let listed = store.list();
		assert_eq!(listed.len(), 100);
		assert_eq!(timestamps(&listed), (51..=150).rev().collect::<Vec<_>>());
		assert_eq!(store.written(), 150);
	}

	#[test]
	fn test_overwrite_over_many_laps() {
		let store = ring(3);
		for ts in 1..=10 {
			store.create(Message::new("m", ts));
		}

		assert_eq!(timestamps(&store.list()), vec![10, 9, 8]);
	}

	#[test]
	fn test_capacity_of_one() {
		let store = ring(1);
		store.create(Message::new("a", 1));
		store.create(Message::new("b", 2));

		assert_eq!(store.list(), vec![Message::new("b", 2)]);
	}

	#[test]
	fn test_timestamp_ties_keep_receipt_order() {
		let store = ring(10);
		store.create(Message::new("first", 5));
		store.create(Message::new("second", 5));
		store.create(Message::new("older ts, newest write", 1));

		let texts: Vec<_> = store.list().into_iter().map(|m| m.text).collect();
		assert_eq!(texts, vec!["older ts, newest write", "second", "first"]);
	}

	#[test]
	fn test_consecutive_lists_are_identical() {
		let store = ring(8);
		for ts in 1..=13 {
			store.create(Message::new("m", ts));
		}

		assert_eq!(store.list(), store.list());
	}

	#[test]
	fn test_preserves_assigned_id() {
		let store = ring(2);
		store.create(Message::new("stored", 1).with_id(42));

		assert_eq!(store.list()[0].id, Some(42));
	}

	#[test]
	fn test_concurrent_writers_lose_nothing() {
		const WRITERS: usize = 4;
		const PER_WRITER: usize = 25;

		let store = Arc::new(ring(WRITERS * PER_WRITER));
		thread::scope(|scope| {
			for writer in 0..WRITERS {
				let store = Arc::clone(&store);
				scope.spawn(move || {
					for seq in 0..PER_WRITER {
						store.create(Message::new(format!("{writer}:{seq}"), seq as i64));
					}
				});
			}
		});

		let listed = store.list();
		assert_eq!(listed.len(), WRITERS * PER_WRITER);

		let unique: HashSet<_> = listed.iter().map(|m| m.text.clone()).collect();
		assert_eq!(unique.len(), listed.len());

		// each writer's own messages must come back in reverse creation order
		for writer in 0..WRITERS {
			let prefix = format!("{writer}:");
			let seqs: Vec<i64> =
				listed.iter().filter(|m| m.text.starts_with(&prefix)).map(|m| m.timestamp).collect();
			assert_eq!(seqs, (0..PER_WRITER as i64).rev().collect::<Vec<_>>());
		}
	}

	#[test]
	fn test_concurrent_readers_see_consistent_snapshots() {
		const WRITERS: usize = 4;
		const PER_WRITER: usize = 200;

		let store = Arc::new(ring(100));
		let done = Arc::new(AtomicBool::new(false));

		thread::scope(|scope| {
			let reader = {
				let store = Arc::clone(&store);
				let done = Arc::clone(&done);
				scope.spawn(move || {
					let mut last_len = 0;
					while !done.load(Ordering::Acquire) {
						let snapshot = store.list();
						assert!(snapshot.len() <= 100);
						assert!(snapshot.len() >= last_len);
						last_len = snapshot.len();

						for writer in 0..WRITERS {
							let prefix = format!("{writer}:");
							let seqs: Vec<i64> = snapshot
								.iter()
								.filter(|m| m.text.starts_with(&prefix))
								.map(|m| m.timestamp)
								.collect();
							assert!(seqs.windows(2).all(|w| w[0] > w[1]));
						}
					}
				})
			};

			let writers: Vec<_> = (0..WRITERS)
				.map(|writer| {
					let store = Arc::clone(&store);
					scope.spawn(move || {
						for seq in 0..PER_WRITER {
							store.create(Message::new(format!("{writer}:{seq}"), seq as i64));
						}
					})
				})
				.collect();

			for writer in writers {
				writer.join().unwrap();
			}
			done.store(true, Ordering::Release);
			reader.join().unwrap();
		});

		assert_eq!(store.len(), 100);
		assert_eq!(store.written(), (WRITERS * PER_WRITER) as u64);
	}
}
