//! indexd daemon entrypoint.
//!
//! Parse flags, load the configuration, initialize logging, then run the
//! accept loop until SIGINT or SIGTERM arrives.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                   INDEXD                     │
//!                     │                                              │
//!     TLS Client      │  ┌──────────┐   ┌────────────┐   ┌────────┐ │
//!     ────────────────┼─▶│   net    │──▶│  security  │──▶│listing │ │
//!                     │  │ listener │   │    acl     │   │  walk  │ │
//!                     │  └──────────┘   └─────┬──────┘   └───┬────┘ │
//!                     │                  deny │              │      │
//!     Listing         │                 (close)              │      │
//!     ◀───────────────┼───────────────────────┴──────────────┘      │
//!                     │                                              │
//!                     │  ┌────────────────────────────────────────┐ │
//!                     │  │         Cross-Cutting Concerns         │ │
//!                     │  │  ┌────────┐ ┌───────────┐ ┌─────────┐  │ │
//!                     │  │  │ config │ │ lifecycle │ │ logging │  │ │
//!                     │  │  └────────┘ └───────────┘ └─────────┘  │ │
//!                     │  └────────────────────────────────────────┘ │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use indexd::config::{self, DEFAULT_CONFIG_PATH};
use indexd::lifecycle::{signals, Shutdown};
use indexd::net::listener::Listener;
use indexd::observability::logging;
use indexd::security::acl;
use indexd::IndexServer;

#[derive(Parser)]
#[command(
    name = "indexd",
    version,
    about = "Serve a directory listing to ACL-allowed peers over TLS",
    disable_version_flag = true
)]
struct Cli {
    /// Print version information.
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Turn on debugging output.
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logging needs the config (for the logfile path), so config failures
    // can only go to stderr.
    let config = match config::load_config(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("indexd: cannot load {}: {err}", cli.config.display());
            std::process::exit(1);
        }
    };

    if let Err(err) = logging::init(cli.debug, config.logfile.as_deref()) {
        eprintln!("indexd: cannot open log destination: {err}");
        std::process::exit(1);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "Indexd starting"
    );
    tracing::debug!(
        root = %config.indexd_directory.display(),
        listen = %config.listen_addr(),
        acl_entries = config.acl.len(),
        cert = %config.cert.display(),
        key = %config.key.display(),
        "Configuration loaded"
    );

    if config.acl.is_empty() {
        tracing::warn!("ACL is empty, every connection will be denied");
    }
    for entry in &config.acl {
        if acl::host_portion(entry).is_empty() {
            tracing::warn!(entry = %entry, "ACL entry has an empty host portion and can never match");
        }
    }

    let server = match IndexServer::new(config.clone()) {
        Ok(server) => server,
        Err(err) => {
            tracing::error!(error = %err, "TLS setup failed");
            std::process::exit(1);
        }
    };

    let listener = match Listener::bind(&config).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, "Cannot bind listener");
            std::process::exit(1);
        }
    };

    let shutdown = Shutdown::new();
    let accept_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, accept_shutdown).await;

    tracing::info!("Indexd stopped");
}
