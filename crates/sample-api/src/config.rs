//! Server configuration for the task API.
//!
//! Configuration comes from command line arguments with environment variable
//! fallbacks, or programmatically.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RESTCHECK_PORT` | 8080 | Server port |
//! | `RESTCHECK_HOST` | 127.0.0.1 | Host to bind |
//! | `RESTCHECK_BASE_URL` | http://localhost:8080 | Base URL for Location headers |
//! | `RESTCHECK_DEFAULT_PAGE_SIZE` | 20 | Page size when a list names none |
//! | `RESTCHECK_MAX_PAGE_SIZE` | 100 | Largest accepted page size |
//! | `RESTCHECK_LOG_LEVEL` | info | Log level |
//!
//! # Example
//!
//! ```rust
//! use restcheck_sample_api::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use clap::Parser;

/// Server configuration for the task API.
///
/// Construct from command line arguments with [`ServerConfig::parse`], from
/// the environment with [`ServerConfig::from_env`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "sample-api")]
#[command(about = "Reference task service for REST conformance testing")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "RESTCHECK_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "RESTCHECK_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Base URL used to build Location headers.
    #[arg(long, env = "RESTCHECK_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Page size used when a list request names none.
    #[arg(long, env = "RESTCHECK_DEFAULT_PAGE_SIZE", default_value = "20")]
    pub default_page_size: usize,

    /// Largest page size a list request may ask for.
    #[arg(long, env = "RESTCHECK_MAX_PAGE_SIZE", default_value = "100")]
    pub max_page_size: usize,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "RESTCHECK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            base_url: "http://localhost:8080".to_string(),
            default_page_size: 20,
            max_page_size: 100,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Creates a ServerConfig from environment variables, falling back to
    /// defaults when parsing fails.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if self.base_url.ends_with('/') {
            errors.push("Base URL must not end with a slash".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            base_url: "http://localhost".to_string(),
            default_page_size: 10,
            max_page_size: 100,
            log_level: "debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.default_page_size, 20);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_invalid_page_sizes() {
        let config = ServerConfig {
            default_page_size: 200,
            max_page_size: 50,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_trailing_slash() {
        let config = ServerConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("slash")));
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert_eq!(config.default_page_size, 10);
    }
}
