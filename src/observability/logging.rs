//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Route events to stderr or to the configured logfile
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - `RUST_LOG` wins when set; otherwise `-d` selects debug level for the
//!   daemon's own events
//! - The logfile is opened in append mode so restarts do not truncate it

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Fails only when the configured logfile cannot be opened, which is fatal
/// at startup. A second call in the same process leaves the first
/// subscriber installed, so tests sharing a process stay harmless.
pub fn init(debug: bool, logfile: Option<&Path>) -> Result<(), std::io::Error> {
    let default_filter = if debug { "indexd=debug" } else { "indexd=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (writer, ansi) = match logfile {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Arc::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(ansi),
        )
        .try_init();

    Ok(())
}
