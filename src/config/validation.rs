//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Catch listen pairs, admission limits and TLS paths that could never
//!   serve before startup
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: no I/O, no logging
//! - Runs before the config is accepted into the system
//! - ACL content is never a load error: an entry that cannot match any
//!   peer denies by construction, which is the fail-closed default anyway;
//!   startup warns about such entries instead of refusing to run

use thiserror::Error;

use crate::config::schema::IndexdConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listen address must not be empty")]
    EmptyAddress,

    #[error("listen port must not be zero")]
    ZeroPort,

    #[error("max_connections must not be zero")]
    ZeroMaxConnections,

    #[error("indexd_directory must not be empty")]
    EmptyRootDir,

    #[error("certificate path must not be empty")]
    EmptyCertPath,

    #[error("key path must not be empty")]
    EmptyKeyPath,
}

/// Check a parsed configuration for semantic problems.
pub fn validate_config(config: &IndexdConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.address.is_empty() {
        errors.push(ValidationError::EmptyAddress);
    }
    if config.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }
    if config.indexd_directory.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyRootDir);
    }
    if config.cert.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyCertPath);
    }
    if config.key.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyKeyPath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
