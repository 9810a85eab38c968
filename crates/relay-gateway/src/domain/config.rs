//! Gateway configuration from environment variables.
//!
//! The ledger variant requires four values (`RELAY_RPC_URL`,
//! `RELAY_PRIVATE_KEY`, `RELAY_PROGRAM_ID`, `RELAY_NETWORK`) with no
//! defaults; startup refuses to continue and reports every missing name at
//! once. The memory variant requires none of them.

use std::collections::HashMap;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment names for the ledger connection.
const ENV_RPC_URL: &str = "RELAY_RPC_URL";
const ENV_PRIVATE_KEY: &str = "RELAY_PRIVATE_KEY";
const ENV_PROGRAM_ID: &str = "RELAY_PROGRAM_ID";
const ENV_NETWORK: &str = "RELAY_NETWORK";
const ENV_BACKEND: &str = "RELAY_BACKEND";
const ENV_HTTP_HOST: &str = "RELAY_HTTP_HOST";
const ENV_HTTP_PORT: &str = "RELAY_HTTP_PORT";
const ENV_RPC_TIMEOUT_SECS: &str = "RELAY_RPC_TIMEOUT_SECS";

/// Which execution strategy backs the HTTP surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// Sign and submit real transactions against the deployed program.
    Ledger,
    /// Simulate the API with an in-process list.
    Memory,
}

impl FromStr for BackendMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ledger" => Ok(Self::Ledger),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue {
                name: ENV_BACKEND.to_string(),
                reason: format!("expected 'ledger' or 'memory', got '{other}'"),
            }),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bind address.
    pub host: IpAddr,
    /// Bind port.
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

/// Ledger connection parameters, present only in ledger mode.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint of the ledger node.
    pub rpc_url: String,
    /// Signing key material, array-of-bytes literal.
    pub private_key: String,
    /// Deployed program address, base58.
    pub program_id: String,
    /// Network label reported by health.
    pub network: String,
    /// Bound on every outbound RPC call.
    pub rpc_timeout: Duration,
}

/// Main gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HTTP server configuration.
    pub http: HttpConfig,
    /// Active execution strategy.
    pub mode: BackendMode,
    /// Ledger connection, `Some` exactly in ledger mode.
    pub ledger: Option<LedgerConfig>,
}

impl GatewayConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup(ENV_BACKEND) {
            Some(raw) => raw.parse()?,
            None => BackendMode::Ledger,
        };

        let host = match lookup(ENV_HTTP_HOST) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_HTTP_HOST.to_string(),
                reason: format!("not an IP address: '{raw}'"),
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = match lookup(ENV_HTTP_PORT) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_HTTP_PORT.to_string(),
                reason: format!("not a port number: '{raw}'"),
            })?,
            None => 8080,
        };

        let ledger = match mode {
            BackendMode::Memory => None,
            BackendMode::Ledger => {
                let required = [ENV_RPC_URL, ENV_PRIVATE_KEY, ENV_PROGRAM_ID, ENV_NETWORK];
                let mut values = HashMap::new();
                let mut missing = Vec::new();
                for name in required {
                    match lookup(name) {
                        Some(value) if !value.is_empty() => {
                            values.insert(name, value);
                        }
                        _ => missing.push(name.to_string()),
                    }
                }
                if !missing.is_empty() {
                    return Err(ConfigError::MissingEnv(missing));
                }

                let timeout_secs = match lookup(ENV_RPC_TIMEOUT_SECS) {
                    Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                        name: ENV_RPC_TIMEOUT_SECS.to_string(),
                        reason: format!("not a number of seconds: '{raw}'"),
                    })?,
                    None => 10u64,
                };

                Some(LedgerConfig {
                    rpc_url: values.remove(ENV_RPC_URL).unwrap_or_default(),
                    private_key: values.remove(ENV_PRIVATE_KEY).unwrap_or_default(),
                    program_id: values.remove(ENV_PROGRAM_ID).unwrap_or_default(),
                    network: values.remove(ENV_NETWORK).unwrap_or_default(),
                    rpc_timeout: Duration::from_secs(timeout_secs),
                })
            }
        };

        let config = Self {
            http: HttpConfig { host, port },
            mode,
            ledger,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ledger) = &self.ledger {
            if ledger.rpc_timeout.is_zero() {
                return Err(ConfigError::InvalidValue {
                    name: ENV_RPC_TIMEOUT_SECS.to_string(),
                    reason: "timeout cannot be 0".to_string(),
                });
            }
        }
        if self.mode == BackendMode::Ledger && self.ledger.is_none() {
            return Err(ConfigError::MissingEnv(vec![
                ENV_RPC_URL.to_string(),
                ENV_PRIVATE_KEY.to_string(),
                ENV_PROGRAM_ID.to_string(),
                ENV_NETWORK.to_string(),
            ]));
        }
        Ok(())
    }

    /// Get HTTP server bind address.
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// Configuration errors, fatal at startup.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// One or more required environment variables are absent.
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<String>),

    /// An environment variable is present but unusable.
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue {
        /// Offending variable name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    fn full_ledger_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("RELAY_RPC_URL", "http://localhost:8899"),
            ("RELAY_PRIVATE_KEY", "[1,2,3]"),
            ("RELAY_PROGRAM_ID", "Prog111"),
            ("RELAY_NETWORK", "devnet"),
        ]
    }

    #[test]
    fn test_ledger_mode_reports_all_missing_names() {
        let err = GatewayConfig::from_lookup(vars(&[])).unwrap_err();
        match err {
            ConfigError::MissingEnv(names) => {
                assert_eq!(
                    names,
                    vec![
                        "RELAY_RPC_URL",
                        "RELAY_PRIVATE_KEY",
                        "RELAY_PROGRAM_ID",
                        "RELAY_NETWORK"
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_partial_env_lists_only_missing() {
        let pairs = [
            ("RELAY_RPC_URL", "http://localhost:8899"),
            ("RELAY_NETWORK", "devnet"),
        ];
        let err = GatewayConfig::from_lookup(vars(&pairs)).unwrap_err();
        match err {
            ConfigError::MissingEnv(names) => {
                assert_eq!(names, vec!["RELAY_PRIVATE_KEY", "RELAY_PROGRAM_ID"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut pairs = full_ledger_env();
        pairs[1] = ("RELAY_PRIVATE_KEY", "");
        let err = GatewayConfig::from_lookup(vars(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(ref names) if names == &["RELAY_PRIVATE_KEY"]));
    }

    #[test]
    fn test_complete_ledger_env_loads() {
        let pairs = full_ledger_env();
        let config = GatewayConfig::from_lookup(vars(&pairs)).unwrap();
        assert_eq!(config.mode, BackendMode::Ledger);
        let ledger = config.ledger.unwrap();
        assert_eq!(ledger.network, "devnet");
        assert_eq!(ledger.rpc_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_memory_mode_needs_no_ledger_env() {
        let pairs = [("RELAY_BACKEND", "memory")];
        let config = GatewayConfig::from_lookup(vars(&pairs)).unwrap();
        assert_eq!(config.mode, BackendMode::Memory);
        assert!(config.ledger.is_none());
        assert_eq!(config.http_addr().port(), 8080);
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let pairs = [("RELAY_BACKEND", "postgres")];
        let err = GatewayConfig::from_lookup(vars(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut pairs = full_ledger_env();
        pairs.push(("RELAY_RPC_TIMEOUT_SECS", "0"));
        let err = GatewayConfig::from_lookup(vars(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_custom_bind_address() {
        let mut pairs = full_ledger_env();
        pairs.push(("RELAY_HTTP_HOST", "127.0.0.1"));
        pairs.push(("RELAY_HTTP_PORT", "9000"));
        let config = GatewayConfig::from_lookup(vars(&pairs)).unwrap();
        assert_eq!(config.http_addr().to_string(), "127.0.0.1:9000");
    }
}
