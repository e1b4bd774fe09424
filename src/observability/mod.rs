//! Observability subsystem.
//!
//! The daemon's observable surface is its log stream: startup, denials,
//! listings served, failures. Events carry structured fields rather than
//! formatted strings so they can be filtered and parsed downstream.

pub mod logging;
