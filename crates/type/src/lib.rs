// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared value types and the workspace error type.

pub mod error;
pub mod message;

pub use error::{BoxError, Error, Result};
pub use message::Message;
