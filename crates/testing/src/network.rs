// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::net::{SocketAddr, TcpListener};

/// Reserve an ephemeral localhost port and release it for the caller to bind.
pub fn free_local_socket() -> SocketAddr {
	let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind to ephemeral port");
	let addr = listener.local_addr().expect("failed to get local addr");
	drop(listener);
	addr
}

/// `http://<addr>` base url for a bound server.
pub fn base_url(addr: SocketAddr) -> String {
	format!("http://{addr}")
}
