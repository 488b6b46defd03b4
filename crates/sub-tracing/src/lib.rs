// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Structured logging subsystem built on `tracing-subscriber`.

pub mod builder;
pub mod subsystem;

pub use builder::{LogFormat, TracingBuilder};
pub use subsystem::TracingSubsystem;
