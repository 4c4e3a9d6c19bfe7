use std::{env, net::SocketAddr, str::FromStr};

use thiserror::Error;

/// How a request body that is not a decodable JSON object is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorMode {
    /// Plain-text HTTP 500, no JSON-RPC envelope.
    #[default]
    Http,
    /// HTTP 200 with a JSON-RPC `-32700 Parse error` envelope.
    JsonRpc,
}

impl FromStr for ParseErrorMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "jsonrpc" | "json-rpc" => Ok(Self::JsonRpc),
            _ => Err(ConfigError::InvalidParseErrorMode),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub bind_port: u16,
    pub mcp_path: String,
    pub parse_errors: ParseErrorMode,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("MCP_PATH must start with '/' and contain no whitespace")]
    InvalidPath,
    #[error("MCP_PARSE_ERRORS must be one of: http, jsonrpc")]
    InvalidParseErrorMode,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_addr = non_empty("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string());
        let bind_port = non_empty("BIND_PORT")
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(8080);
        let mcp_path = non_empty("MCP_PATH").unwrap_or_else(|| "/mcp".to_string());
        if !mcp_path.starts_with('/') || mcp_path.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidPath);
        }
        let parse_errors = non_empty("MCP_PARSE_ERRORS")
            .map(|value| value.parse::<ParseErrorMode>())
            .transpose()?
            .unwrap_or_default();

        let config = Self {
            bind_addr,
            bind_port,
            mcp_path,
            parse_errors,
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks that the bind address and port form a usable socket address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_socket().map(|_| ())
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn parse_defaults() {
        let config = config_from(&[]).expect("config should parse");
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.mcp_path, "/mcp");
        assert_eq!(config.parse_errors, ParseErrorMode::Http);
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("BIND_ADDR", "0.0.0.0"),
            ("BIND_PORT", "3000"),
            ("MCP_PATH", "/api/mcp"),
            ("MCP_PARSE_ERRORS", "JSONRPC"),
        ])
        .expect("config should parse");

        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.bind_port, 3000);
        assert_eq!(config.mcp_path, "/api/mcp");
        assert_eq!(config.parse_errors, ParseErrorMode::JsonRpc);
        assert_eq!(
            config.bind_socket().expect("socket"),
            "0.0.0.0:3000".parse().expect("valid socket")
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[("BIND_PORT", "  "), ("MCP_PATH", "")])
            .expect("config should parse");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.mcp_path, "/mcp");
    }

    #[test]
    fn invalid_port_fails() {
        let err = config_from(&[("BIND_PORT", "70000")]).expect_err("expected invalid port");
        assert!(matches!(err, ConfigError::InvalidPort));
    }

    #[test]
    fn relative_path_fails() {
        let err = config_from(&[("MCP_PATH", "mcp")]).expect_err("expected invalid path");
        assert!(matches!(err, ConfigError::InvalidPath));
    }

    #[test]
    fn unknown_parse_error_mode_fails() {
        let err = config_from(&[("MCP_PARSE_ERRORS", "silent")])
            .expect_err("expected invalid parse error mode");
        assert!(matches!(err, ConfigError::InvalidParseErrorMode));
    }

    #[test]
    fn invalid_bind_addr_fails() {
        let err = config_from(&[("BIND_ADDR", "not an address")])
            .expect_err("expected invalid socket");
        assert!(matches!(err, ConfigError::InvalidSocket));
    }

    #[test]
    fn validate_checks_the_bind_socket() {
        let mut config = config_from(&[]).expect("config should parse");
        config.validate().expect("defaults are a valid socket");

        config.bind_addr = "localhost.invalid".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSocket)));

        config.bind_addr = "::1".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSocket)));

        config.bind_addr = "[::1]".to_string();
        config.validate().expect("bracketed IPv6 is a valid socket");
    }
}
