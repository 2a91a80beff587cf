//! Service settings loaded via OrthoConfig.
//!
//! Values merge command-line flags, `USUARIOS_*` / `PEDIDOS_*` environment
//! variables, and configuration files. Every field is optional; accessors
//! apply defaults and validate.

use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::seed::SeedError;
use crate::outbound::usuarios::HttpUserDirectoryBuildError;

const DEFAULT_USUARIOS_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_USUARIOS_BASE_PATH: &str = "/api";
const DEFAULT_PEDIDOS_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_PEDIDOS_BASE_PATH: &str = "";
const DEFAULT_USUARIOS_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_USUARIOS_TIMEOUT_MS: u64 = 10_000;

/// Errors raised while turning settings into server configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        /// Raw configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: AddrParseError,
    },
    /// The base path contains whitespace.
    #[error("invalid base path '{0}': must not contain whitespace")]
    InvalidBasePath(String),
    /// The users service base URL does not parse.
    #[error("invalid usuarios base URL '{value}': {source}")]
    InvalidBaseUrl {
        /// Raw configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// A zero timeout would fail every directory call.
    #[error("usuarios timeout must be greater than zero")]
    ZeroTimeout,
    /// The seed file could not be loaded.
    #[error(transparent)]
    Seed(#[from] SeedError),
    /// The directory client could not be built.
    #[error(transparent)]
    Directory(#[from] HttpUserDirectoryBuildError),
}

/// Settings of the user directory service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USUARIOS")]
pub struct UsuariosSettings {
    /// Socket address to listen on.
    #[ortho_config(default = String::from(DEFAULT_USUARIOS_BIND_ADDR))]
    pub bind_addr: String,
    /// Path prefix of the directory endpoints.
    pub base_path: Option<String>,
    /// JSON seed document replacing the built-in seed.
    pub seed_path: Option<PathBuf>,
}

impl UsuariosSettings {
    /// Resolved listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] for malformed addresses.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(&self.bind_addr)
    }

    /// Resolved, normalised path prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBasePath`] when the prefix contains
    /// whitespace.
    pub fn base_path(&self) -> Result<String, SettingsError> {
        normalise_base_path(self.base_path.as_deref().unwrap_or(DEFAULT_USUARIOS_BASE_PATH))
    }

    /// Seed document override, if any.
    #[must_use]
    pub fn seed_path(&self) -> Option<&Path> {
        self.seed_path.as_deref()
    }
}

/// Settings of the order aggregation service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PEDIDOS")]
pub struct PedidosSettings {
    /// Socket address to listen on.
    #[ortho_config(default = String::from(DEFAULT_PEDIDOS_BIND_ADDR))]
    pub bind_addr: String,
    /// Path prefix of the aggregation endpoints.
    pub base_path: Option<String>,
    /// Base URL of the users service; `/usuarios` is appended.
    pub usuarios_base_url: Option<String>,
    /// Timeout for one directory call, in milliseconds.
    #[ortho_config(default = DEFAULT_USUARIOS_TIMEOUT_MS)]
    pub usuarios_timeout_ms: u64,
    /// JSON seed document replacing the built-in seed.
    pub seed_path: Option<PathBuf>,
}

impl PedidosSettings {
    /// Resolved listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] for malformed addresses.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(&self.bind_addr)
    }

    /// Resolved, normalised path prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBasePath`] when the prefix contains
    /// whitespace.
    pub fn base_path(&self) -> Result<String, SettingsError> {
        normalise_base_path(self.base_path.as_deref().unwrap_or(DEFAULT_PEDIDOS_BASE_PATH))
    }

    /// Resolved users service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] when the URL does not parse.
    pub fn usuarios_base_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .usuarios_base_url
            .as_deref()
            .unwrap_or(DEFAULT_USUARIOS_BASE_URL);
        Url::parse(value).map_err(|source| SettingsError::InvalidBaseUrl {
            value: value.to_owned(),
            source,
        })
    }

    /// Resolved directory call timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] for a zero timeout.
    pub fn usuarios_timeout(&self) -> Result<Duration, SettingsError> {
        match self.usuarios_timeout_ms {
            0 => Err(SettingsError::ZeroTimeout),
            millis => Ok(Duration::from_millis(millis)),
        }
    }

    /// Seed document override, if any.
    #[must_use]
    pub fn seed_path(&self) -> Option<&Path> {
        self.seed_path.as_deref()
    }
}

fn parse_bind_addr(value: &str) -> Result<SocketAddr, SettingsError> {
    value
        .parse()
        .map_err(|source| SettingsError::InvalidBindAddr {
            value: value.to_owned(),
            source,
        })
}

/// Normalise a path prefix to `""` or `/segment[/segment...]`.
pub(crate) fn normalise_base_path(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim();
    if trimmed.chars().any(char::is_whitespace) {
        return Err(SettingsError::InvalidBasePath(raw.to_owned()));
    }
    let segments = trimmed.trim_matches('/');
    if segments.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("/{segments}"))
    }
}
