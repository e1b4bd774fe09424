//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bounded accept, admission permits)
//!     → connection.rs (ACL gate, TLS handshake, listing, write, close)
//!
//! tls.rs loads the certificate material once at startup.
//! ```
//!
//! # Design Decisions
//! - Bounded admission instead of a per-connection readiness handshake:
//!   the accept loop never waits on any particular connection
//! - The TLS handshake runs in the handler, after the ACL gate, so a
//!   denied peer costs no cryptography and receives no bytes
//! - A connection is represented only by its permit; drop means release

pub mod connection;
pub mod listener;
pub mod tls;
