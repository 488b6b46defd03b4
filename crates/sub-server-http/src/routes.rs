// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use axum::{
	Router,
	error_handling::HandleErrorLayer,
	routing::{get, post},
};
use tower::{ServiceBuilder, limit::GlobalConcurrencyLimitLayer};
use tower_http::trace::TraceLayer;

use crate::{
	config::HttpConfig,
	handlers::{create_message, handle_middleware_error, healthcheck, list_messages, not_found},
	state::AppState,
};

/// Build the application router.
///
/// A wrong method on a known path is answered like an unknown path (404).
/// `get` would also answer HEAD, so HEAD is routed to the fallback explicitly.
pub fn router(state: AppState, config: &HttpConfig) -> Router {
	Router::new()
		.route("/message", post(create_message).fallback(not_found))
		.route("/messages", get(list_messages).head(not_found).fallback(not_found))
		.route("/healthcheck", get(healthcheck).head(not_found).fallback(not_found))
		.fallback(not_found)
		.layer(
			ServiceBuilder::new()
				.layer(HandleErrorLayer::new(handle_middleware_error))
				.layer(connection_limit(config))
				.timeout(config.request_timeout)
				.layer(TraceLayer::new_for_http()),
		)
		.with_state(state)
}

/// `Router::layer` wraps every route separately; the semaphore behind this
/// layer is shared by all of those clones, so the limit holds process-wide.
fn connection_limit(config: &HttpConfig) -> GlobalConcurrencyLimitLayer {
	GlobalConcurrencyLimitLayer::new(config.max_connections)
}
