// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use msgring_core::MessageService;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
	service: MessageService,
}

impl AppState {
	pub fn new(service: MessageService) -> Self {
		Self {
			service,
		}
	}

	pub fn service(&self) -> &MessageService {
		&self.service
	}
}
