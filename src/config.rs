// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup. A `.env` file
//! in the working directory is loaded first if present.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Root directory of the file store | `./data` |
//! | `STORAGE_BACKEND` | `file` or `memory` | `file` |
//! | `JWT_SECRET_KEY` | Session token signing secret | random per process |
//! | `CORS_ORIGINS` | Comma-separated allowed origins, or `*` | `*` |
//! | `REQUEST_TIMEOUT_SECS` | Per-request time limit | `10` |
//! | `PAYPAL_CLIENT_ID` | PayPal REST client id | checkout disabled |
//! | `PAYPAL_SECRET` | PayPal REST client secret | checkout disabled |
//! | `PAYPAL_API_BASE_URL` | PayPal REST endpoint | sandbox |
//! | `PAYPAL_CURRENCY` | Currency code for remote orders | `USD` |
//! | `TLS_CERT_PATH` | PEM certificate chain for HTTPS | plain HTTP |
//! | `TLS_KEY_PATH` | PEM private key for HTTPS | plain HTTP |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::payments::paypal::{PayPalConfig, DEFAULT_API_BASE_URL, DEFAULT_CURRENCY};
use crate::storage::paths::DATA_ROOT;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const STORAGE_BACKEND_ENV: &str = "STORAGE_BACKEND";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET_KEY";
pub const CORS_ORIGINS_ENV: &str = "CORS_ORIGINS";
pub const REQUEST_TIMEOUT_ENV: &str = "REQUEST_TIMEOUT_SECS";
pub const PAYPAL_CLIENT_ID_ENV: &str = "PAYPAL_CLIENT_ID";
pub const PAYPAL_SECRET_ENV: &str = "PAYPAL_SECRET";
pub const PAYPAL_API_BASE_URL_ENV: &str = "PAYPAL_API_BASE_URL";
pub const PAYPAL_CURRENCY_ENV: &str = "PAYPAL_CURRENCY";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
    pub storage_backend: StorageBackend,
    /// `None` means an ephemeral secret is generated at startup.
    pub jwt_secret: Option<SecretString>,
    pub cors_origins: CorsOrigins,
    pub request_timeout: Duration,
    /// `None` disables checkout.
    pub paypal: Option<PayPalConfig>,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let get_or = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let host = get_or(HOST_ENV, "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar(HOST_ENV.to_string(), e.to_string()))?;
        let port = get_or(PORT_ENV, "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar(PORT_ENV.to_string(), e.to_string()))?;

        let data_dir = PathBuf::from(get_or(DATA_DIR_ENV, DATA_ROOT));
        let storage_backend = match get_or(STORAGE_BACKEND_ENV, "file").to_ascii_lowercase().as_str() {
            "file" => StorageBackend::File,
            "memory" => StorageBackend::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    STORAGE_BACKEND_ENV.to_string(),
                    format!("unknown backend {other:?} (expected file or memory)"),
                ))
            }
        };

        let jwt_secret = get(JWT_SECRET_ENV).map(SecretString::from);
        let cors_origins = parse_cors_origins(&get_or(CORS_ORIGINS_ENV, "*"));

        let timeout_secs = get_or(REQUEST_TIMEOUT_ENV, &DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(REQUEST_TIMEOUT_ENV.to_string(), e.to_string()))?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                REQUEST_TIMEOUT_ENV.to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let paypal = match (get(PAYPAL_CLIENT_ID_ENV), get(PAYPAL_SECRET_ENV)) {
            (Some(client_id), Some(secret)) => {
                let api_base_url = get_or(PAYPAL_API_BASE_URL_ENV, DEFAULT_API_BASE_URL);
                validate_base_url(&api_base_url)?;
                Some(PayPalConfig {
                    client_id,
                    client_secret: SecretString::from(secret),
                    api_base_url,
                    currency: get_or(PAYPAL_CURRENCY_ENV, DEFAULT_CURRENCY).to_ascii_uppercase(),
                })
            }
            _ => None,
        };

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: PathBuf::from(cert),
                key: PathBuf::from(key),
            }),
            (Some(_), None) => return Err(ConfigError::MissingEnvVar(TLS_KEY_PATH_ENV.to_string())),
            (None, Some(_)) => return Err(ConfigError::MissingEnvVar(TLS_CERT_PATH_ENV.to_string())),
            (None, None) => None,
        };

        let log_format = match get(LOG_FORMAT_ENV).as_deref() {
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            host,
            port,
            data_dir,
            storage_backend,
            jwt_secret,
            cors_origins,
            request_timeout: Duration::from_secs(timeout_secs),
            paypal,
            tls,
            log_format,
        })
    }

    /// Returns the socket address for binding the server.
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_cors_origins(raw: &str) -> CorsOrigins {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}

fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(PAYPAL_API_BASE_URL_ENV.to_string(), e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidEnvVar(
            PAYPAL_API_BASE_URL_ENV.to_string(),
            format!("unsupported scheme {other:?}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.storage_backend, StorageBackend::File);
        assert!(config.jwt_secret.is_none());
        assert_eq!(config.cors_origins, CorsOrigins::Any);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.paypal.is_none());
        assert!(config.tls.is_none());
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn explicit_values_are_used() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DATA_DIR", "/var/lib/shop"),
            ("STORAGE_BACKEND", "memory"),
            ("JWT_SECRET_KEY", "s3cr3t"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/shop"));
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.jwt_secret.unwrap().expose_secret(), "s3cr3t");
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn paypal_requires_both_credentials() {
        assert!(load(&[("PAYPAL_CLIENT_ID", "id")]).unwrap().paypal.is_none());
        assert!(load(&[("PAYPAL_SECRET", "secret")]).unwrap().paypal.is_none());

        let paypal = load(&[
            ("PAYPAL_CLIENT_ID", "id"),
            ("PAYPAL_SECRET", "secret"),
            ("PAYPAL_CURRENCY", "eur"),
        ])
        .unwrap()
        .paypal
        .unwrap();
        assert_eq!(paypal.client_id, "id");
        assert_eq!(paypal.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(paypal.currency, "EUR");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidEnvVar(name, _)) if name == "PORT"
        ));
        assert!(matches!(
            load(&[("STORAGE_BACKEND", "mongo")]),
            Err(ConfigError::InvalidEnvVar(name, _)) if name == "STORAGE_BACKEND"
        ));
        assert!(matches!(
            load(&[("REQUEST_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidEnvVar(name, _)) if name == "REQUEST_TIMEOUT_SECS"
        ));
        assert!(matches!(
            load(&[
                ("PAYPAL_CLIENT_ID", "id"),
                ("PAYPAL_SECRET", "secret"),
                ("PAYPAL_API_BASE_URL", "ftp://paypal.example")
            ]),
            Err(ConfigError::InvalidEnvVar(name, _)) if name == "PAYPAL_API_BASE_URL"
        ));
    }

    #[test]
    fn tls_paths_must_come_in_pairs() {
        assert!(matches!(
            load(&[("TLS_CERT_PATH", "/certs/server.pem")]),
            Err(ConfigError::MissingEnvVar(name)) if name == "TLS_KEY_PATH"
        ));

        let tls = load(&[
            ("TLS_CERT_PATH", "/certs/server.pem"),
            ("TLS_KEY_PATH", "/certs/server.key"),
        ])
        .unwrap()
        .tls
        .unwrap();
        assert_eq!(tls.key, PathBuf::from("/certs/server.key"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[("PORT", "  "), ("JWT_SECRET_KEY", "")]).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.jwt_secret.is_none());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = load(&[
            ("JWT_SECRET_KEY", "super-sensitive"),
            ("PAYPAL_CLIENT_ID", "id"),
            ("PAYPAL_SECRET", "paypal-sensitive"),
        ])
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-sensitive"));
        assert!(!rendered.contains("paypal-sensitive"));
    }
}
