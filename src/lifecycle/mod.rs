//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse flags → Load config → Init logging → Load TLS → Bind → Accept
//!
//! Shutdown:
//!     SIGINT/SIGTERM → signals.rs resolves
//!     → shutdown.rs broadcast trigger
//!     → accept loop stops, process exits 0
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then logging, then the listener, so
//!   every failure past the config stage reaches the configured log
//! - Stopping is immediate: the listener closes and the process exits;
//!   a connection mid-write is cut with its socket

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
