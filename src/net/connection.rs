//! Per-connection handling.
//!
//! # Data Flow
//! ```text
//! accepted TCP stream
//!     → ACL check (before any I/O; a denied peer is closed untouched)
//!     → TLS handshake as responder, deadline-bounded
//!     → listing walk on a blocking thread, deadline-bounded
//!     → single write of the listing, TLS shutdown, close
//! ```
//!
//! Every path out of `handle_connection` closes the connection (the stream
//! is owned here and dropped on return) and releases the admission permit.
//! Failures on one connection are logged and stay on that connection.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::listing::{self, WalkCancel};
use crate::net::listener::ConnectionPermit;
use crate::server::ServerState;

/// Handle one accepted connection to completion.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    state: ServerState,
    _permit: ConnectionPermit,
) {
    let started = Instant::now();

    if !state.acl.allows(peer.ip()) {
        tracing::info!(peer_addr = %peer, "Denied connection");
        return;
    }
    tracing::info!(peer_addr = %peer, "Accepted connection");

    let timeouts = &state.config.timeouts;

    let handshake = state.tls.accept(stream);
    let mut stream = match timeout(Duration::from_secs(timeouts.handshake_secs), handshake).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(err)) => {
            tracing::warn!(peer_addr = %peer, error = %err, "TLS handshake failed");
            return;
        }
        Err(_) => {
            tracing::warn!(peer_addr = %peer, "TLS handshake timed out");
            return;
        }
    };

    // The walk runs on a blocking thread into a handler-local buffer; two
    // concurrent handlers never touch the same listing.
    let cancel = WalkCancel::new();
    let walk = {
        let root = state.config.indexd_directory.clone();
        let cancel = cancel.clone();
        tokio::task::spawn_blocking(move || listing::generate(&root, &cancel))
    };

    let body = match timeout(Duration::from_secs(timeouts.walk_secs), walk).await {
        Ok(Ok(body)) => body,
        Ok(Err(err)) => {
            tracing::error!(peer_addr = %peer, error = %err, "Listing walk failed");
            return;
        }
        Err(_) => {
            cancel.cancel();
            tracing::warn!(
                peer_addr = %peer,
                root = %state.config.indexd_directory.display(),
                "Listing walk timed out"
            );
            return;
        }
    };

    let write = async {
        stream.write_all(body.as_bytes()).await?;
        stream.shutdown().await
    };

    match timeout(Duration::from_secs(timeouts.write_secs), write).await {
        Ok(Ok(())) => {
            tracing::info!(
                peer_addr = %peer,
                bytes = body.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Listing sent"
            );
        }
        Ok(Err(err)) => {
            tracing::warn!(peer_addr = %peer, error = %err, "Failed to write listing");
        }
        Err(_) => {
            tracing::warn!(peer_addr = %peer, "Listing write timed out");
        }
    }
}
