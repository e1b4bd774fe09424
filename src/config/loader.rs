//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::IndexdConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// Load and validate a configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<IndexdConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: IndexdConfig = serde_json::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_a_complete_config() {
        let file = write_config(
            r#"{
                "indexd_directory": "/srv/files",
                "acl": ["10.0.0.5", "192.168.1.9:51000"],
                "address": "0.0.0.0",
                "port": 51000,
                "logfile": "/var/log/indexd.log",
                "cert": "/etc/indexd/cert.pem",
                "key": "/etc/indexd/key.pem",
                "max_connections": 64,
                "timeouts": { "handshake_secs": 5, "walk_secs": 60, "write_secs": 60 }
            }"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.indexd_directory.to_str(), Some("/srv/files"));
        assert_eq!(config.acl.len(), 2);
        assert_eq!(config.listen_addr(), "0.0.0.0:51000");
        assert_eq!(config.logfile.as_deref().and_then(|p| p.to_str()), Some("/var/log/indexd.log"));
        assert_eq!(config.max_connections, 64);
        assert_eq!(config.timeouts.walk_secs, 60);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config(Path::new("/nonexistent/indexd/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let file = write_config("{ not json");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn semantic_problems_are_validation_errors() {
        let file = write_config(
            r#"{
                "indexd_directory": "/srv/files",
                "acl": [],
                "address": "",
                "port": 0,
                "cert": "/etc/indexd/cert.pem",
                "key": "/etc/indexd/key.pem"
            }"#,
        );

        let err = load_config(file.path()).unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert!(errors.contains(&ValidationError::EmptyAddress));
                assert!(errors.contains(&ValidationError::ZeroPort));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn acl_entries_that_never_match_do_not_block_loading() {
        // "::1" reduces to an empty host portion and will deny, but the
        // daemon must still start and serve the entries that do match.
        let file = write_config(
            r#"{
                "indexd_directory": "/srv/files",
                "acl": ["::1", "10.0.0.5"],
                "address": "0.0.0.0",
                "port": 51000,
                "cert": "/etc/indexd/cert.pem",
                "key": "/etc/indexd/key.pem"
            }"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.acl, vec!["::1", "10.0.0.5"]);
    }

    #[test]
    fn zero_max_connections_is_a_validation_error() {
        let file = write_config(
            r#"{
                "indexd_directory": "/srv/files",
                "acl": ["10.0.0.5"],
                "address": "0.0.0.0",
                "port": 51000,
                "cert": "/etc/indexd/cert.pem",
                "key": "/etc/indexd/key.pem",
                "max_connections": 0
            }"#,
        );

        let err = load_config(file.path()).unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert!(errors.contains(&ValidationError::ZeroMaxConnections));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn string_port_is_a_parse_error() {
        // Ports are numbers in this format; a quoted port fails at parse.
        let file = write_config(
            r#"{
                "indexd_directory": "/srv/files",
                "acl": ["10.0.0.5"],
                "address": "0.0.0.0",
                "port": "51000",
                "cert": "/etc/indexd/cert.pem",
                "key": "/etc/indexd/key.pem"
            }"#,
        );

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validation_error_display_joins_every_problem() {
        let err = ConfigError::Validation(vec![
            ValidationError::EmptyAddress,
            ValidationError::ZeroPort,
        ]);
        let text = err.to_string();
        assert!(text.contains("listen address must not be empty"));
        assert!(text.contains("listen port must not be zero"));
    }
}
