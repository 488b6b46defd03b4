// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Message service façade and the interfaces it depends on.
//!
//! The transport layer only ever talks to [`MessageService`]; the ring buffer
//! and the optional durable mirror stay behind it.

pub mod interface;
pub mod service;

pub use interface::MessageMirror;
pub use msgring_store_ring::{DEFAULT_CAPACITY, RingStore};
pub use msgring_type::{Error, Message, Result};
pub use service::MessageService;
