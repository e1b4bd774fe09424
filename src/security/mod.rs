//! Security subsystem.
//!
//! # Design Decisions
//! - Fail closed: a peer is served only when an ACL entry matches exactly
//! - The only input trusted is the socket's own peer address; nothing the
//!   peer sends is read

pub mod acl;

pub use acl::AccessList;
