// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! SQLite-backed durable mirror for accepted messages.

mod config;
mod mirror;

pub use config::{DbPath, SqliteConfig};
pub use mirror::SqliteMirror;
