//! Peer access control.
//!
//! # Responsibilities
//! - Reduce configured ACL entries to their host portion
//! - Compare peer addresses against entries by exact string equality
//!
//! # Design Decisions
//! - Equality only: no CIDR ranges, no wildcards, no DNS lookups
//! - A `host:port` entry matches on its host; the port is ignored
//! - An empty list denies every peer (fail closed)

use std::net::IpAddr;

/// The host portion of an ACL entry: everything before the first `:`.
///
/// `10.0.0.5:51000` reduces to `10.0.0.5`; an entry with no colon is its
/// own host portion. Colon-delimited IPv6 entries therefore reduce to a
/// fragment that never equals a peer address and never match.
pub fn host_portion(entry: &str) -> &str {
    entry.split(':').next().unwrap_or(entry)
}

/// The set of peer hosts permitted to fetch a listing.
///
/// Built once at startup from the configured entries and shared read-only
/// by every connection handler.
#[derive(Debug, Clone)]
pub struct AccessList {
    hosts: Vec<String>,
}

impl AccessList {
    /// Build an access list from configured `host` / `host:port` entries.
    pub fn from_entries(entries: &[String]) -> Self {
        Self {
            hosts: entries.iter().map(|e| host_portion(e).to_string()).collect(),
        }
    }

    /// Whether a peer connecting from `peer` is permitted.
    ///
    /// The peer address is rendered to text and compared against each host
    /// for equality; the first match wins.
    pub fn allows(&self, peer: IpAddr) -> bool {
        let host = peer.to_string();
        self.hosts.iter().any(|h| h == &host)
    }

    /// Whether no entries are configured.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
