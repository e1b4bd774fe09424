//! Directory listing generation.
//!
//! # Data Flow
//! ```text
//! connection handler
//!     → spawn_blocking(generate(root, cancel))
//!     → WalkDir traversal (depth-first, sorted by file name)
//!     → one path per line into a handler-local String
//!     → written to the peer, then dropped
//! ```
//!
//! # Design Decisions
//! - A fresh listing is generated per connection; nothing is cached or
//!   shared between handlers
//! - Unreadable entries are skipped; the walk itself never fails
//! - Entries are sorted so identical trees produce identical listings
//! - Cancellation is cooperative: the walk checks a flag between entries

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::WalkDir;

/// Cooperative cancellation handle for an in-flight walk.
///
/// A clone travels into the blocking walk; when the deadline on the async
/// side fires, the abandoned walk stops at its next entry instead of
/// running a large tree to completion.
#[derive(Debug, Clone, Default)]
pub struct WalkCancel(Arc<AtomicBool>);

impl WalkCancel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the walk to stop at the next entry boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Produce the newline-delimited recursive listing of `root`.
///
/// Every reachable file and directory is emitted as one `path\n` line, the
/// root itself included, prefixed exactly as `root` was given. Entries the
/// walk cannot read are skipped and the traversal continues. If `cancel`
/// fires mid-walk the partial listing is returned as-is; a timed-out
/// caller discards it.
pub fn generate(root: &Path, cancel: &WalkCancel) -> String {
    let mut listing = String::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        if cancel.is_cancelled() {
            tracing::debug!(root = %root.display(), "Listing walk cancelled");
            break;
        }

        match entry {
            Ok(entry) => {
                listing.push_str(&entry.path().to_string_lossy());
                listing.push('\n');
            }
            Err(err) => {
                // One unreadable entry must not abort the whole listing.
                tracing::debug!(error = %err, "Skipping unreadable entry");
                continue;
            }
        }
    }

    listing
}
