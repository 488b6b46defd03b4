// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Lifecycle interface shared by all subsystems.

pub mod subsystem;

pub use subsystem::{HealthStatus, Subsystem};
