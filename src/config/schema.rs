//! Configuration schema definitions.
//!
//! The on-disk format is JSON: a flat object naming the directory to serve,
//! the peer ACL, the listen pair and the TLS material. Field names match the
//! deployed config layout; the port is a number here, where older files
//! carried it as a quoted string. Tuning knobs are optional and defaulted.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the daemon configuration.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/indexd/config.json";

/// Root configuration for the indexd daemon.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexdConfig {
    /// Directory whose recursive listing is served to allowed peers.
    pub indexd_directory: PathBuf,

    /// Permitted peer hosts, as `host` or `host:port` entries. Only the
    /// host portion is ever compared.
    pub acl: Vec<String>,

    /// Listen host.
    pub address: String,

    /// Listen port.
    pub port: u16,

    /// Log destination; stderr when absent.
    #[serde(default)]
    pub logfile: Option<PathBuf>,

    /// Path to the PEM certificate chain presented to peers.
    pub cert: PathBuf,

    /// Path to the PEM private key.
    pub key: PathBuf,

    /// Maximum number of connections admitted at once.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Per-connection stage deadlines.
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl IndexdConfig {
    /// The `address:port` pair the listener binds.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

fn default_max_connections() -> usize {
    256
}

/// Deadlines applied to each stage of a connection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// TLS handshake deadline in seconds.
    pub handshake_secs: u64,

    /// Directory walk deadline in seconds.
    pub walk_secs: u64,

    /// Listing write deadline in seconds.
    pub write_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            handshake_secs: 10,
            walk_secs: 30,
            write_secs: 30,
        }
    }
}
