// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fixed-capacity in-memory message store.
//!
//! [`RingStore`] keeps the most recent `capacity` messages in a circular slot
//! arena. Once full, every write overwrites the oldest entry. Reads return a
//! point-in-time snapshot ordered newest first.
//!
//! Writes walk the cursor backwards through the arena, so reading forward from
//! the cursor already yields newest-first order and no sort is needed. This
//! also means messages with colliding timestamps are listed in receipt order.

mod ring;

pub use ring::{DEFAULT_CAPACITY, RingStore};
