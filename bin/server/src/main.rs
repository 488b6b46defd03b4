// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{num::NonZeroUsize, process::ExitCode, sync::Arc, time::Duration};

use clap::{Args, Parser, Subcommand};
use msgring_core::{DEFAULT_CAPACITY, MessageMirror, MessageService, RingStore};
use msgring_runtime::SharedRuntime;
use msgring_store_sqlite::{SqliteConfig, SqliteMirror};
use msgring_sub_api::Subsystem;
use msgring_sub_server_http::{AppState, HttpConfig, HttpSubsystem};
use msgring_sub_tracing::{LogFormat, TracingBuilder, TracingSubsystem};
use msgring_type::{Error, Result};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "msgring-server", version, about = "Keeps the most recent messages and serves them over HTTP")]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Start the api server
	Start(StartArgs),
	/// Migrate the durable mirror schema
	Migrate(MigrateArgs),
}

#[derive(Debug, Args)]
struct StartArgs {
	/// Port to listen to
	#[arg(short, long, env = "PORT", default_value_t = 80)]
	port: u16,

	#[arg(long, env = "HOST", default_value = "0.0.0.0")]
	host: String,

	/// Number of messages kept in memory
	#[arg(long, env = "MSGRING_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
	capacity: NonZeroUsize,

	/// Optional durable mirror, e.g. `sqlite3://messages.db`
	#[arg(long, env = "DATABASE_URL")]
	database_url: Option<String>,

	/// Run the mirror migration before serving
	#[arg(long, requires = "database_url")]
	auto_migrate: bool,

	#[arg(long, default_value_t = 1024)]
	max_connections: usize,

	/// Seconds a single request may take before it is answered with 408
	#[arg(long, default_value_t = 30)]
	request_timeout: u64,

	/// Seconds to wait for in-flight requests on shutdown
	#[arg(long, default_value_t = 5)]
	shutdown_timeout: u64,

	#[arg(long, default_value_t = 4)]
	worker_threads: usize,

	#[command(flatten)]
	logging: LoggingArgs,
}

#[derive(Debug, Args)]
struct MigrateArgs {
	#[arg(long, env = "DATABASE_URL")]
	database_url: String,

	#[command(flatten)]
	logging: LoggingArgs,
}

#[derive(Debug, Args)]
struct LoggingArgs {
	/// Filter directive; `RUST_LOG` takes precedence when set
	#[arg(long, default_value = "info")]
	log_level: String,

	/// `text` or `json`
	#[arg(long, env = "LOG_FORMAT", default_value_t = LogFormat::Text)]
	log_format: LogFormat,
}

impl LoggingArgs {
	fn subsystem(&self) -> TracingSubsystem {
		TracingBuilder::new().level(self.log_level.clone()).format(self.log_format).build()
	}
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	let result = match cli.command {
		Command::Start(args) => start(args),
		Command::Migrate(args) => migrate(args),
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("error: {err}");
			ExitCode::FAILURE
		}
	}
}

fn start(args: StartArgs) -> Result<()> {
	let mut logging = args.logging.subsystem();
	logging.start()?;

	let runtime = SharedRuntime::new(args.worker_threads)?;

	let mut service = MessageService::new(Arc::new(RingStore::with_capacity(args.capacity)));
	if let Some(url) = &args.database_url {
		let mirror = open_mirror(url)?;
		if args.auto_migrate {
			mirror.migrate()?;
			info!("migration complete");
		}
		service = service.with_mirror(Arc::new(mirror));
	}
	let has_mirror = service.has_mirror();

	let config = HttpConfig::default()
		.bind_addr(format!("{}:{}", args.host, args.port))
		.max_connections(args.max_connections)
		.request_timeout(Duration::from_secs(args.request_timeout))
		.shutdown_timeout(Duration::from_secs(args.shutdown_timeout));

	let mut http = HttpSubsystem::new(config, AppState::new(service), runtime.clone());
	if let Err(err) = http.start() {
		error!("failed to start HTTP server: {}", err);
		return Err(err);
	}
	info!(capacity = args.capacity.get(), "server running on http://localhost:{}/", http.port().unwrap_or(args.port));

	runtime.block_on(tokio::signal::ctrl_c()).map_err(Error::Runtime)?;

	info!("Shutting down the server...");
	http.shutdown()?;
	info!("Server gracefully stopped");

	drop(http);
	if has_mirror {
		info!("Database connection closed");
	}

	logging.shutdown()
}

fn migrate(args: MigrateArgs) -> Result<()> {
	let mut logging = args.logging.subsystem();
	logging.start()?;

	info!("starting migration");
	open_mirror(&args.database_url)?.migrate()?;
	info!("migration complete");

	logging.shutdown()
}

fn open_mirror(url: &str) -> Result<SqliteMirror> {
	let config = SqliteConfig::from_url(url)?;
	SqliteMirror::open(&config)
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn test_cli_is_consistent() {
		Cli::command().debug_assert();
	}

	#[test]
	fn test_start_defaults() {
		let cli = Cli::try_parse_from(["msgring-server", "start", "--port", "8080"]).unwrap();
		let Command::Start(args) = cli.command else {
			panic!("expected start");
		};
		assert_eq!(args.port, 8080);
		assert_eq!(args.capacity.get(), 100);
		assert_eq!(args.logging.log_format, LogFormat::Text);
		assert!(!args.auto_migrate);
		assert_eq!(args.request_timeout, 30);
	}

	#[test]
	fn test_zero_capacity_is_rejected() {
		assert!(Cli::try_parse_from(["msgring-server", "start", "--capacity", "0"]).is_err());
	}

	#[test]
	fn test_auto_migrate_requires_database_url() {
		if std::env::var_os("DATABASE_URL").is_some() {
			return;
		}
		assert!(Cli::try_parse_from(["msgring-server", "start", "--auto-migrate"]).is_err());
	}

	#[test]
	fn test_migrate_parses_database_url() {
		let cli = Cli::try_parse_from(["msgring-server", "migrate", "--database-url", "sqlite3://:memory:"]).unwrap();
		let Command::Migrate(args) = cli.command else {
			panic!("expected migrate");
		};
		assert_eq!(args.database_url, "sqlite3://:memory:");
		open_mirror(&args.database_url).unwrap().migrate().unwrap();
	}
}
