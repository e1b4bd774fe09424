//! TCP listener with bounded admission.
//!
//! # Responsibilities
//! - Bind the configured `address:port`
//! - Accept incoming TCP connections
//! - Enforce `max_connections` via a semaphore permit held per connection
//!
//! The permit is the only coupling between the accept loop and a handler:
//! it is released by drop on every handler exit path, including an early
//! return on an ACL denial and a panic, so the accept loop can never be
//! left waiting on a connection that already ended.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::config::IndexdConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind the listen address.
    #[error("failed to bind: {0}")]
    Bind(std::io::Error),

    /// Failed to accept a connection.
    #[error("failed to accept: {0}")]
    Accept(std::io::Error),
}

/// A bounded TCP listener.
///
/// A semaphore enforces `max_connections`. When every slot is taken, the
/// accept loop waits for a permit before touching the socket again, so the
/// kernel backlog absorbs any burst.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    admission: Arc<Semaphore>,
}

impl Listener {
    /// Bind to the configured listen address.
    pub async fn bind(config: &IndexdConfig) -> Result<Self, ListenerError> {
        let addr: SocketAddr = config.listen_addr().parse().map_err(|e| {
            ListenerError::Bind(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
        })?;

        let listener = TcpListener::bind(addr).await.map_err(ListenerError::Bind)?;
        let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;

        tracing::info!(
            address = %local_addr,
            max_connections = config.max_connections,
            "Listener bound"
        );

        Ok(Self {
            inner: listener,
            admission: Arc::new(Semaphore::new(config.max_connections)),
        })
    }

    /// Accept the next connection, waiting for an admission slot first.
    ///
    /// Returns the stream, the peer address and the permit the handler must
    /// hold for the connection's lifetime.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr, ConnectionPermit), ListenerError> {
        let permit = self
            .admission
            .clone()
            .acquire_owned()
            .await
            .expect("Semaphore closed unexpectedly");

        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;

        tracing::debug!(
            peer_addr = %addr,
            available_permits = self.admission.available_permits(),
            "Connection accepted"
        );

        Ok((stream, addr, ConnectionPermit { _permit: permit }))
    }

    /// The local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }
}

/// An admission slot held for a connection's lifetime.
///
/// Dropping it returns the slot, exactly once, whatever path the handler
/// took to its end.
#[derive(Debug)]
pub struct ConnectionPermit {
    _permit: OwnedSemaphorePermit,
}
