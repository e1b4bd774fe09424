//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → IndexdConfig (validated, immutable)
//!     → shared via Arc to the accept loop and handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - Field names match the deployed JSON format
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{IndexdConfig, TimeoutConfig, DEFAULT_CONFIG_PATH};
pub use validation::{validate_config, ValidationError};
