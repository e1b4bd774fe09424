//! Accept-loop orchestration.
//!
//! # Responsibilities
//! - Own the TLS acceptor and the shared read-only state
//! - Accept connections and dispatch one handler task per connection
//! - Keep accepting after per-connection failures; only startup errors
//!   are fatal
//! - Stop cleanly when the shutdown signal fires

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio_rustls::TlsAcceptor;

use crate::config::IndexdConfig;
use crate::net::connection::handle_connection;
use crate::net::listener::Listener;
use crate::net::tls::{load_tls_config, TlsError};
use crate::security::AccessList;

/// Read-only state cloned into every connection handler.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<IndexdConfig>,
    pub acl: Arc<AccessList>,
    pub tls: TlsAcceptor,
}

/// The indexd server: TLS material, access list and the accept loop.
pub struct IndexServer {
    state: ServerState,
}

impl std::fmt::Debug for IndexServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // TlsAcceptor carries no Debug impl; show the inspectable parts.
        f.debug_struct("IndexServer")
            .field("config", &self.state.config)
            .field("acl", &self.state.acl)
            .finish_non_exhaustive()
    }
}

impl IndexServer {
    /// Build the server from a loaded configuration.
    ///
    /// Reads the certificate and key here so a bad keypair fails startup
    /// before any socket is opened.
    pub fn new(config: IndexdConfig) -> Result<Self, TlsError> {
        let tls = TlsAcceptor::from(load_tls_config(&config.cert, &config.key)?);
        let acl = Arc::new(AccessList::from_entries(&config.acl));

        Ok(Self {
            state: ServerState {
                config: Arc::new(config),
                acl,
                tls,
            },
        })
    }

    /// Run the accept loop until the shutdown signal fires.
    ///
    /// Each accepted connection is handed to its own task; an accept error
    /// is logged and the loop continues with the next connection.
    pub async fn run(self, listener: Listener, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!("Indexd service started");

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, stopping accept loop");
                    return;
                }
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer, permit)) => {
                            let state = self.state.clone();
                            tokio::spawn(handle_connection(stream, peer, state, permit));
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "Accept failed");
                        }
                    }
                }
            }
        }
    }
}
