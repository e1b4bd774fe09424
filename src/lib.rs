//! indexd: a TLS-gated directory listing daemon.
//!
//! Accept a connection, check the peer against an IP access list, and for
//! an allowed peer complete a TLS handshake and write back the recursive
//! listing of one configured directory, one path per line, then close.
//! Nothing is ever read from the peer.

pub mod config;
pub mod listing;
pub mod net;
pub mod server;

pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::IndexdConfig;
pub use lifecycle::Shutdown;
pub use server::IndexServer;
